//! Shader source re-indentation.
//!
//! This module contains the core formatting logic organized into submodules:
//! - [`indenter`]: Brace-driven indentation state machine, one line at a time
//! - [`blanks`]: Blank-line collapsing and trailing-blank trimming

pub mod blanks;
pub mod indenter;

pub use blanks::collapse_blank_lines;
pub use indenter::Reindenter;
