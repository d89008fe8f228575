//! Directive line classification for `#preset` / `#endpreset`
//!
//! Any line whose first non-whitespace character is `#` is a directive and is
//! emitted without re-indentation. Two directives additionally toggle the
//! verbatim preset mode: `#preset <name>` opens a preset block, `#endpreset`
//! closes one. Keywords are case-insensitive; the preset name keeps its case.

use std::sync::LazyLock;

use regex::Regex;

/// `#preset <name>` - keyword, exactly one space, then the (case-preserved) name
static PRESET_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^#preset (.*)$").unwrap());

/// `#endpreset` - the whole trimmed line, nothing else
static PRESET_CLOSE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^#endpreset$").unwrap());

/// Classification of a directive line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive<'a> {
    /// `#preset <name>`: starts a verbatim block
    PresetBegin(&'a str),
    /// `#endpreset`: ends a verbatim block (a no-op when none is open)
    PresetEnd,
    /// Any other `#` line (e.g. `#include`, `#define`); passed through as-is
    Other,
}

/// Check if a line is a directive (first non-whitespace character is `#`)
#[must_use]
pub fn is_directive_line(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

/// Classify a trimmed directive line.
///
/// Expects the line with surrounding whitespace already removed, which is how
/// the indenter emits directives.
#[must_use]
pub fn parse_directive(trimmed: &str) -> Directive<'_> {
    if let Some(caps) = PRESET_OPEN_RE.captures(trimmed) {
        // Capture 1 always exists when the pattern matches
        let name = caps.get(1).map_or("", |m| m.as_str());
        return Directive::PresetBegin(name);
    }
    if PRESET_CLOSE_RE.is_match(trimmed) {
        return Directive::PresetEnd;
    }
    Directive::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_directive_line() {
        assert!(is_directive_line("#preset default"));
        assert!(is_directive_line("  #include \"common.frag\""));
        assert!(is_directive_line("#define PI 3.14"));
        assert!(!is_directive_line("x = 1;"));
        assert!(!is_directive_line("// #not a directive"));
    }

    #[test]
    fn test_parse_preset_begin() {
        assert_eq!(
            parse_directive("#preset Default"),
            Directive::PresetBegin("Default")
        );
    }

    #[test]
    fn test_parse_preset_begin_case_insensitive_keyword() {
        assert_eq!(
            parse_directive("#PRESET Orbit Cam"),
            Directive::PresetBegin("Orbit Cam")
        );
    }

    #[test]
    fn test_preset_without_name_is_other() {
        // No space-separated name: not a preset opener
        assert_eq!(parse_directive("#preset"), Directive::Other);
    }

    #[test]
    fn test_parse_preset_end() {
        assert_eq!(parse_directive("#endpreset"), Directive::PresetEnd);
        assert_eq!(parse_directive("#EndPreset"), Directive::PresetEnd);
    }

    #[test]
    fn test_endpreset_with_trailing_text_is_other() {
        assert_eq!(parse_directive("#endpreset now"), Directive::Other);
    }

    #[test]
    fn test_other_directives() {
        assert_eq!(parse_directive("#include \"DE-Raytracer.frag\""), Directive::Other);
        assert_eq!(parse_directive("#define MaxSteps 100"), Directive::Other);
    }
}
