//! Command-line interface for fragfmt.
//!
//! Defines CLI arguments using clap builder API

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

/// CLI arguments parsed from command line
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Files or directories to format
    pub inputs: Vec<PathBuf>,

    /// Write changes back to files (in-place)
    pub write: bool,

    /// Check only; exit non-zero if any file would change
    pub check: bool,

    /// List changed files on stdout
    pub list: bool,

    /// Output formatted text to stdout instead of reporting
    pub stdout: bool,

    /// Number of spaces per indent level
    pub indent: Option<usize>,

    /// Exclude patterns for files/directories (glob patterns)
    pub exclude: Vec<String>,

    /// Custom source extensions (in addition to `frag`)
    pub frag_extensions: Vec<String>,

    /// Number of parallel jobs (0 = auto, 1 = sequential)
    pub jobs: Option<usize>,

    /// Config file path
    pub config: Option<PathBuf>,

    /// Silent mode (no summary output)
    pub silent: bool,

    /// Enable debug output
    pub debug: bool,
}

/// Build the clap Command for parsing CLI arguments
#[must_use]
pub fn build_cli() -> Command {
    Command::new("fragfmt")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Conservative beautifier for Fragmentarium .frag files (indentation/blank lines/trailing spaces)")
        .arg(
            Arg::new("inputs")
                .help("Files or directories to scan")
                .value_name("PATH")
                .num_args(1..)
                .required(false)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("write")
                .short('w')
                .long("write")
                .help("Write changes to files")
                .action(ArgAction::SetTrue)
                .conflicts_with("check"),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .help("Check only; exit non-zero if changes are needed")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list")
                .short('l')
                .long("list")
                .help("List changed files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("stdout")
                .short('s')
                .long("stdout")
                .help("Output formatted text to stdout instead of modifying files")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("indent")
                .short('i')
                .long("indent")
                .help("Number of spaces per indent level [default: 2]")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .help("Exclude files/directories matching pattern (glob syntax, can be repeated)")
                .value_name("PATTERN")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("frag")
                .short('f')
                .long("frag")
                .help("Additional source file extension (can be repeated, e.g., -f fs -f glsl)")
                .value_name("EXT")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .help("Number of parallel jobs (0=auto, 1=sequential)")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to configuration file (overrides auto-discovery)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("silent")
                .short('S')
                .long("silent")
                .help("Silent mode (no summary output)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("debug")
                .short('D')
                .long("debug")
                .help("Enable debug output (shows config discovery)")
                .action(ArgAction::SetTrue),
        )
}

/// Parse CLI arguments from command line
#[must_use]
pub fn parse_args() -> CliArgs {
    args_from_matches(&build_cli().get_matches())
}

/// Parse CLI arguments from an iterator (for testing)
#[must_use]
pub fn parse_args_from<I, T>(args: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    args_from_matches(&build_cli().get_matches_from(args))
}

/// Convert clap `ArgMatches` to `CliArgs`
fn args_from_matches(matches: &clap::ArgMatches) -> CliArgs {
    CliArgs {
        inputs: matches
            .get_many::<PathBuf>("inputs")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        write: matches.get_flag("write"),
        check: matches.get_flag("check"),
        list: matches.get_flag("list"),
        stdout: matches.get_flag("stdout"),
        indent: matches.get_one::<usize>("indent").copied(),
        exclude: matches
            .get_many::<String>("exclude")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        frag_extensions: matches
            .get_many::<String>("frag")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        jobs: matches.get_one::<usize>("jobs").copied(),
        config: matches.get_one::<PathBuf>("config").cloned(),
        silent: matches.get_flag("silent"),
        debug: matches.get_flag("debug"),
    }
}
