/// `Reindenter` - Brace-driven indentation state machine
///
/// Consumes one line at a time and emits it re-indented. Three pieces of
/// state thread through the line sequence: the current nesting level
/// (clamped at zero), the verbatim preset-mode flag, and the block-comment
/// flag carried into the scanner.
///
/// The engine is total: mismatched braces, unterminated comments, or stray
/// `#endpreset` directives never raise an error.
use crate::directive::{parse_directive, Directive};
use crate::parser::line_brace_stats;

/// `Reindenter` tracks nesting depth and re-emits lines with canonical indent
pub struct Reindenter {
    /// Nesting level applied to the next emitted line; never negative
    indent_level: usize,
    /// Inside a `#preset` / `#endpreset` verbatim block
    in_preset: bool,
    /// Inside an unterminated block comment carried from a previous line
    in_block_comment: bool,
    /// One level of indentation (spaces only, never tabs)
    unit: String,
}

impl Reindenter {
    /// Create a new `Reindenter`
    ///
    /// # Arguments
    /// * `indent` - Number of spaces per indentation level
    #[must_use]
    pub fn new(indent: usize) -> Self {
        Self {
            indent_level: 0,
            in_preset: false,
            in_block_comment: false,
            unit: " ".repeat(indent),
        }
    }

    /// Current nesting level (for the next line to be emitted)
    #[must_use]
    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    /// Whether the machine is currently inside a preset block
    #[must_use]
    pub fn in_preset(&self) -> bool {
        self.in_preset
    }

    /// Re-indent a single line and update the machine state.
    ///
    /// Trailing spaces/tabs are always removed. Blank lines come out empty.
    /// Directive lines are emitted fully trimmed and never touch the level;
    /// `#preset`/`#endpreset` toggle verbatim mode. Inside a preset block
    /// lines pass through with leading whitespace stripped and the scanner is
    /// never consulted. Everything else is emitted at
    /// `max(level - leading_close, 0)` units, after which the line's brace
    /// delta moves the level (clamped at zero).
    pub fn process_line(&mut self, raw: &str) -> String {
        let line = raw.trim_end_matches([' ', '\t']);
        let stripped = line.trim_start_matches([' ', '\t']);

        if stripped.is_empty() {
            return String::new();
        }

        if stripped.starts_with('#') {
            match parse_directive(stripped) {
                Directive::PresetBegin(_) => self.in_preset = true,
                Directive::PresetEnd => self.in_preset = false,
                Directive::Other => {}
            }
            return stripped.to_string();
        }

        if self.in_preset {
            return stripped.to_string();
        }

        let (stats, next_in_block_comment) = line_brace_stats(line, self.in_block_comment);
        self.in_block_comment = next_in_block_comment;

        let effective_indent = self.indent_level.saturating_sub(stats.leading_close);
        let mut formatted =
            String::with_capacity(effective_indent * self.unit.len() + stripped.len());
        for _ in 0..effective_indent {
            formatted.push_str(&self.unit);
        }
        formatted.push_str(stripped);

        #[allow(
            clippy::cast_possible_wrap,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        {
            self.indent_level = (self.indent_level as i64 + i64::from(stats.delta)).max(0) as usize;
        }

        formatted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(lines: &[&str]) -> Vec<String> {
        let mut indenter = Reindenter::new(2);
        lines.iter().map(|l| indenter.process_line(l)).collect()
    }

    #[test]
    fn test_simple_block() {
        let out = run(&["void main() {", "x = 1;", "}"]);
        assert_eq!(out, vec!["void main() {", "  x = 1;", "}"]);
    }

    #[test]
    fn test_nested_blocks() {
        let out = run(&["a {", "b {", "c;", "}", "}"]);
        assert_eq!(out, vec!["a {", "  b {", "    c;", "  }", "}"]);
    }

    #[test]
    fn test_close_and_reopen_same_line() {
        let out = run(&["if (x) {", "y;", "} else {", "z;", "}"]);
        assert_eq!(out, vec!["if (x) {", "  y;", "} else {", "  z;", "}"]);
    }

    #[test]
    fn test_level_clamped_at_zero() {
        let out = run(&["}", "}", "x;"]);
        assert_eq!(out, vec!["}", "}", "x;"]);
    }

    #[test]
    fn test_trailing_whitespace_removed() {
        let out = run(&["x = 1;  \t"]);
        assert_eq!(out, vec!["x = 1;"]);
    }

    #[test]
    fn test_blank_line_emitted_empty() {
        let out = run(&["a {", "   \t", "}"]);
        assert_eq!(out, vec!["a {", "", "}"]);
    }

    #[test]
    fn test_directive_never_indented() {
        let out = run(&["a {", "   #define X 1", "}"]);
        assert_eq!(out, vec!["a {", "#define X 1", "}"]);
    }

    #[test]
    fn test_directive_does_not_change_level() {
        let out = run(&["a {", "#define X 1", "b;", "}"]);
        assert_eq!(out, vec!["a {", "#define X 1", "  b;", "}"]);
    }

    #[test]
    fn test_preset_block_verbatim() {
        let mut indenter = Reindenter::new(2);
        assert_eq!(indenter.process_line("#preset Default"), "#preset Default");
        assert!(indenter.in_preset());
        // Braces inside the preset are not counted
        assert_eq!(indenter.process_line("   camera = { 1, 2 }"), "camera = { 1, 2 }");
        assert_eq!(indenter.process_line("#endpreset"), "#endpreset");
        assert!(!indenter.in_preset());
        assert_eq!(indenter.indent_level(), 0);
        assert_eq!(indenter.process_line("x;"), "x;");
    }

    #[test]
    fn test_stray_endpreset_is_noop() {
        let out = run(&["#endpreset", "a {", "b;", "}"]);
        assert_eq!(out, vec!["#endpreset", "a {", "  b;", "}"]);
    }

    #[test]
    fn test_block_comment_state_threads_through() {
        let out = run(&["a {", "/* {{{", "}}} */", "b;", "}"]);
        assert_eq!(out, vec!["a {", "  /* {{{", "  }}} */", "  b;", "}"]);
    }

    #[test]
    fn test_brace_in_string_opacity() {
        let out = run(&[r#"foo("}"); {"#, "bar();", "}"]);
        assert_eq!(out, vec![r#"foo("}"); {"#, "  bar();", "}"]);
    }

    #[test]
    fn test_custom_indent_unit() {
        let mut indenter = Reindenter::new(4);
        assert_eq!(indenter.process_line("a {"), "a {");
        assert_eq!(indenter.process_line("b;"), "    b;");
    }
}
