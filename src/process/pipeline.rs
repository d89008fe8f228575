//! Text-to-text formatting pipeline
//!
//! The pipeline is total over arbitrary input text: mismatched braces,
//! unterminated strings or comments, and stray directives all format without
//! error. It is also idempotent: formatting already-formatted text is a
//! no-op, which is what the change-detection contract relies on.

use std::io::{BufRead, Write};

use crate::config::Config;
use crate::format::{collapse_blank_lines, Reindenter};
use crate::Result;

/// Result of formatting one source unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOutcome {
    /// The formatted text, `\n`-terminated
    pub text: String,
    /// Whether the formatted text differs from the newline-normalized input
    pub changed: bool,
}

/// Normalize line endings: `\r\n` and bare `\r` both become `\n`.
#[must_use]
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Format one source unit.
///
/// Pure and stateless across invocations; the returned text ends with exactly
/// one trailing newline.
#[must_use]
pub fn format_text(text: &str, config: &Config) -> String {
    let normalized = normalize_newlines(text);

    let mut indenter = Reindenter::new(config.indent);
    let mut lines: Vec<String> = normalized
        .split('\n')
        .map(|line| indenter.process_line(line))
        .collect();

    collapse_blank_lines(&mut lines);

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Format one source unit and report whether it changed.
///
/// Callers compare against the newline-normalized input, so a file whose only
/// difference is CRLF line endings on disk still counts as changed only when
/// the formatter actually rewrote something beyond what normalization did.
#[must_use]
pub fn format_source(text: &str, config: &Config) -> FormatOutcome {
    let formatted = format_text(text, config);
    let changed = formatted != normalize_newlines(text);
    FormatOutcome {
        text: formatted,
        changed,
    }
}

/// Format UTF-8 text from a reader and write the result.
///
/// Read and write errors propagate; the formatting itself cannot fail.
pub fn format_file<R: BufRead, W: Write>(
    mut input: R,
    output: &mut W,
    config: &Config,
) -> Result<()> {
    let mut text = String::new();
    input.read_to_string(&mut text)?;
    output.write_all(format_text(&text, config).as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(text: &str) -> String {
        format_text(text, &Config::default())
    }

    #[test]
    fn test_concrete_scenario() {
        assert_eq!(fmt("a{\nb\n}\nc\n\n\nd\n"), "a{\n  b\n}\nc\n\nd\n");
    }

    #[test]
    fn test_idempotent() {
        let input = "a{\r\n  b // }\n\n\n}\n#preset p\n   raw {\n#endpreset\nc\n";
        let once = fmt(input);
        assert_eq!(fmt(&once), once);
    }

    #[test]
    fn test_crlf_normalized() {
        assert_eq!(fmt("a{\r\nb\r}\r\n"), "a{\n  b\n}\n");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(fmt(""), "\n");
        assert_eq!(fmt("\n"), "\n");
    }

    #[test]
    fn test_single_trailing_newline() {
        assert_eq!(fmt("x;"), "x;\n");
        assert_eq!(fmt("x;\n\n\n"), "x;\n");
    }

    #[test]
    fn test_change_detection() {
        let clean = "a {\n  b;\n}\n";
        assert!(!format_source(clean, &Config::default()).changed);
        assert!(format_source("a {\nb;\n}\n", &Config::default()).changed);
    }

    #[test]
    fn test_crlf_only_difference_counts_as_unchanged() {
        // Normalization alone is not a change under the contract
        let outcome = format_source("a {\r\n  b;\r\n}\r\n", &Config::default());
        assert!(!outcome.changed);
    }

    #[test]
    fn test_format_file_roundtrip() {
        let input = std::io::Cursor::new("a{\nb\n}\n");
        let mut output = Vec::new();
        format_file(input, &mut output, &Config::default()).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "a{\n  b\n}\n");
    }
}
