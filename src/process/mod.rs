//! Formatting pipeline.
//!
//! Orchestrates one formatting run over one source unit:
//! - Normalize line endings to `\n` and split into lines
//! - Drive the [`crate::format::Reindenter`] line by line
//! - Collapse blank-line runs and trim trailing blanks
//! - Rejoin with a single trailing newline
//!
//! The main entry points are [`format_text`] (pure text-to-text),
//! [`format_source`] (adds the change-detection contract) and [`format_file`]
//! (buffered reader/writer boundary).

pub mod pipeline;

pub use pipeline::{format_file, format_source, format_text, normalize_newlines, FormatOutcome};
