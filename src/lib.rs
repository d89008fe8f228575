//! fragfmt - Conservative beautifier for Fragmentarium .frag shader sources
//!
//! Normalizes indentation, trailing whitespace, and blank-line runs while
//! leaving every token, string, comment, and directive untouched.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::struct_excessive_bools)]

pub mod cli;
pub mod config;
pub mod directive;
pub mod error;
pub mod format;
pub mod parser;
pub mod process;

// Re-export commonly used types
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs};
pub use config::Config;
pub use directive::{is_directive_line, parse_directive, Directive};
pub use error::Result;
pub use process::{format_source, format_text, FormatOutcome};
