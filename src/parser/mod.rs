//! Lexical scanning for .frag shader sources.
//!
//! This module classifies character positions so that only real code is ever
//! counted when computing indentation:
//! - [`CodeFilter`]: Iterator adapter that drops comments (and optionally
//!   string contents) while tracking block-comment state across lines
//! - [`line_brace_stats`]: Per-line brace statistics derived from the
//!   code-only projection
//!
//! The scanner is deliberately forgiving: unterminated strings and block
//! comments carry their state to the next line instead of raising an error.

pub mod code_filter;
pub mod scanner;

pub use code_filter::{CodeFilter, StringDelimiter};
pub use scanner::{line_brace_stats, BraceStats};
