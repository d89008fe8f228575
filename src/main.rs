//! fragfmt - Conservative beautifier for Fragmentarium .frag shader sources

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use fragfmt::process::{format_source, format_text};
use fragfmt::{parse_args, CliArgs, Config, Result};
use glob::Pattern;
use rayon::prelude::*;
use walkdir::WalkDir;

/// Shader file extensions to process
const FRAG_EXTENSIONS: &[&str] = &["frag"];

/// Default maximum file size in bytes (100 MB)
/// Files larger than this are skipped to prevent memory exhaustion
const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = parse_args();

    // Check if we should read from stdin
    let use_stdin =
        args.inputs.is_empty() || (args.inputs.len() == 1 && args.inputs[0].as_os_str() == "-");

    // If no inputs and running interactively, print usage; otherwise read from stdin
    if args.inputs.is_empty() && io::stdin().is_terminal() {
        print_usage();
        return Ok(());
    }

    let config = build_config(&args)?;

    if use_stdin {
        return process_stdin(&config);
    }

    // Configure thread pool if --jobs specified
    if let Some(jobs) = args.jobs {
        if jobs > 0 {
            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
            {
                eprintln!("Warning: failed to configure thread pool: {e}");
            }
        }
    }

    // Collect all files to process
    let files = collect_files(&args, &config)?;
    if files.is_empty() {
        anyhow::bail!("No .frag files found.");
    }

    let changed_files = Mutex::new(Vec::new());
    let error_count = AtomicUsize::new(0);

    let handle_result = |path: &PathBuf, result: Result<bool>| match result {
        Ok(true) => changed_files
            .lock()
            .expect("changed-files lock poisoned")
            .push(path.clone()),
        Ok(false) => {}
        Err(e) => {
            error_count.fetch_add(1, Ordering::Relaxed);
            eprintln!("Error formatting {}: {e}", path.display());
        }
    };

    // Sequential for --stdout (output ordering) or --jobs 1, parallel otherwise
    if args.stdout || args.jobs == Some(1) {
        for path in &files {
            handle_result(path, process_single_file(path, &config, &args));
        }
    } else {
        files
            .par_iter()
            .for_each(|path| handle_result(path, process_single_file(path, &config, &args)));
    }

    let mut changed = changed_files
        .into_inner()
        .expect("changed-files lock poisoned");
    changed.sort();
    let errors = error_count.load(Ordering::Relaxed);

    if !args.silent && !args.stdout {
        let mode = if args.write { "write" } else { "check" };
        println!(
            "fragfmt: mode={mode} files={} changed={}",
            files.len(),
            changed.len()
        );
    }
    if args.list {
        for path in &changed {
            println!("{}", path.display());
        }
    }

    if errors > 0 {
        std::process::exit(2);
    }
    if args.check && !changed.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}

/// Build configuration from CLI args and optional config file
fn build_config(args: &CliArgs) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        // Explicit config file specified
        if args.debug {
            eprintln!(
                "[DEBUG] Using explicit config file: {}",
                config_path.display()
            );
        }
        Config::from_toml_file(config_path)?
    } else {
        // Auto-discover config files starting from the current directory
        let cwd = std::env::current_dir().unwrap_or_default();
        if args.debug {
            let discovered = Config::discover_config_files(&cwd);
            if discovered.is_empty() {
                eprintln!("[DEBUG] No config files discovered");
            } else {
                eprintln!("[DEBUG] Discovered config files:");
                for f in &discovered {
                    eprintln!("[DEBUG]   - {}", f.display());
                }
            }
        }
        Config::from_discovered_files(&cwd)
    };

    // Override with CLI arguments
    if let Some(indent) = args.indent {
        config.indent = indent;
    }
    for ext in &args.frag_extensions {
        if !config.frag_extensions.contains(ext) {
            config.frag_extensions.push(ext.clone());
        }
    }

    if args.debug {
        eprintln!("[DEBUG] Configuration:");
        eprintln!("[DEBUG]   indent: {}", config.indent);
        eprintln!("[DEBUG]   frag_extensions: {:?}", config.frag_extensions);
    }

    // Validate configuration
    if let Some(error) = config.validate() {
        anyhow::bail!("Invalid configuration: {error}");
    }

    Ok(config)
}

/// Collect all files to process.
///
/// Explicit files are taken as given; directories are walked recursively and
/// filtered by extension. A named path that does not exist is an error.
/// The result is sorted and deduplicated.
fn collect_files(args: &CliArgs, config: &Config) -> Result<Vec<PathBuf>> {
    // Compile exclude patterns
    let exclude_patterns: Vec<Pattern> = args
        .exclude
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .collect();

    let mut files = Vec::new();

    for input in &args.inputs {
        if input.is_file() {
            if !is_excluded(input, &exclude_patterns) {
                files.push(input.clone());
            }
        } else if input.is_dir() {
            // Note: WalkDir detects symlink loops when follow_links(true) and
            // returns errors for them. We skip errors via filter_map(ok).
            // max_depth prevents runaway traversal in pathological directory structures.
            for entry in WalkDir::new(input)
                .follow_links(true)
                .max_depth(256)
                .into_iter()
                .filter_map(std::result::Result::ok)
            {
                let path = entry.path();
                if path.is_file()
                    && is_frag_file(path, &config.frag_extensions)
                    && !is_excluded(path, &exclude_patterns)
                {
                    files.push(path.to_path_buf());
                }
            }
        } else {
            anyhow::bail!("Path not found: {}", input.display());
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// Check if a path matches any exclusion pattern
fn is_excluded(path: &Path, patterns: &[Pattern]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let path_str = path.to_string_lossy();

    for pattern in patterns {
        // Match against full path
        if pattern.matches(&path_str) {
            return true;
        }

        // Match against file name only
        if let Some(file_name) = path.file_name() {
            if pattern.matches(&file_name.to_string_lossy()) {
                return true;
            }
        }

        // Match against each path component (for directory patterns)
        for component in path.components() {
            if let std::path::Component::Normal(c) = component {
                if pattern.matches(&c.to_string_lossy()) {
                    return true;
                }
            }
        }
    }

    false
}

/// Check if a file has a recognized shader extension
/// Checks against both default extensions and any custom extensions provided
fn is_frag_file(path: &Path, custom_extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            if FRAG_EXTENSIONS.contains(&ext) {
                return true;
            }
            for custom in custom_extensions {
                let custom_ext = custom.strip_prefix('.').unwrap_or(custom);
                if ext == custom_ext {
                    return true;
                }
            }
            false
        })
}

/// Process a single file; returns whether it needed changes.
///
/// Formatting happens fully in memory and the file is rewritten only when
/// `--write` is set and the content actually changed, so a failure can never
/// leave partial output behind.
fn process_single_file(path: &PathBuf, config: &Config, args: &CliArgs) -> Result<bool> {
    // Check file size BEFORE reading to prevent memory exhaustion
    let metadata = std::fs::metadata(path)?;
    let file_size = metadata.len();
    if file_size > DEFAULT_MAX_FILE_SIZE {
        if !args.silent {
            let size_mb = file_size / (1024 * 1024);
            let limit_mb = DEFAULT_MAX_FILE_SIZE / (1024 * 1024);
            eprintln!(
                "Skipping {} ({size_mb} MB exceeds limit of {limit_mb} MB)",
                path.display()
            );
        }
        return Ok(false);
    }

    let original = std::fs::read_to_string(path)?;
    let outcome = format_source(&original, config);

    if args.stdout {
        io::stdout().write_all(outcome.text.as_bytes())?;
    } else if outcome.changed && args.write {
        std::fs::write(path, outcome.text.as_bytes())?;
    }

    Ok(outcome.changed)
}

/// Process input from stdin, output to stdout
fn process_stdin(config: &Config) -> Result<()> {
    let mut stdin_contents = String::new();
    io::stdin().read_to_string(&mut stdin_contents)?;

    // Check size after reading to prevent processing extremely large input
    #[allow(clippy::cast_possible_truncation)]
    let stdin_size = stdin_contents.len() as u64;
    if stdin_size > DEFAULT_MAX_FILE_SIZE {
        anyhow::bail!(
            "stdin input too large ({} MB exceeds limit of {} MB)",
            stdin_size / (1024 * 1024),
            DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
        );
    }

    let formatted = format_text(&stdin_contents, config);
    io::stdout().write_all(formatted.as_bytes())?;
    Ok(())
}

fn print_usage() {
    println!(
        "fragfmt v{} - Fragmentarium .frag beautifier",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("Normalizes indentation, trailing whitespace, and blank lines.");
    println!("Strings, comments, and directives are never altered.");
    println!();
    println!("Usage:");
    println!("  fragfmt [OPTIONS] <PATH>...");
    println!("  fragfmt [OPTIONS] -              # Read from stdin, write to stdout");
    println!("  cat scene.frag | fragfmt         # Pipe input");
    println!();
    println!("Examples:");
    println!("  fragfmt src/                     # Report files that would change");
    println!("  fragfmt --write src/             # Format in place");
    println!("  fragfmt --check --list src/      # CI gate; list offending files");
    println!("  fragfmt -i 4 scene.frag          # Use 4-space indent");
    println!();
    println!("Options:");
    println!("  -w, --write             Write changes to files");
    println!("      --check             Check only; exit non-zero if changes are needed");
    println!("  -l, --list              List changed files");
    println!("  -s, --stdout            Output formatted text to stdout");
    println!("  -i, --indent <NUM>      Spaces per indent level [default: 2]");
    println!("  -e, --exclude <PATTERN> Exclude files/dirs matching pattern (repeatable)");
    println!("  -f, --frag <EXT>        Additional source extension (repeatable)");
    println!("  -j, --jobs <NUM>        Parallel jobs (0=auto, 1=sequential)");
    println!("  -c, --config <FILE>     Config file path (overrides auto-discovery)");
    println!("  -S, --silent            Silent mode");
    println!("  -D, --debug             Enable debug output");
    println!("  -h, --help              Print help");
    println!();
    println!("Config file auto-discovery:");
    println!("  Searches for fragfmt.toml in the current directory and its parents,");
    println!("  plus the home directory. Closer configs override more distant ones.");
}
