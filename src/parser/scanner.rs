//! Per-line brace statistics.
//!
//! The indentation engine never parses the shader grammar; it only needs to
//! know, for each line, how the braces visible in actual code move the
//! nesting level. This module computes that from the [`CodeFilter`]
//! projection of a line.

use crate::parser::CodeFilter;

/// Brace statistics for one line of source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BraceStats {
    /// Net change of the nesting level: count of `{` minus count of `}`.
    ///
    /// Counted over the strings-filtered projection, so a brace inside a
    /// string literal never moves the level.
    pub delta: i32,
    /// Run of `}` characters at the start of the left-trimmed projection.
    ///
    /// These closers dedent the line itself, before the delta is applied to
    /// the lines that follow.
    pub leading_close: usize,
}

/// Scan one line and compute its brace statistics.
///
/// `in_block_comment` is the state carried from the previous line; the
/// returned bool is the state to carry to the next one. Malformed input
/// (unterminated strings or comments, surplus closers) is accepted silently.
#[must_use]
pub fn line_brace_stats(line: &str, in_block_comment: bool) -> (BraceStats, bool) {
    // Strings preserved: the projection used for leading-close detection
    let mut filter = CodeFilter::with_block_comment_state(line, false, in_block_comment);
    let projection = filter.filter_all();
    let next_in_block_comment = filter.in_block_comment();

    // Strings dropped: the projection used for counting
    let code_only =
        CodeFilter::with_block_comment_state(line, true, in_block_comment).filter_all();

    let leading_close = projection
        .trim_start()
        .chars()
        .take_while(|&c| c == '}')
        .count();

    let opens = code_only.matches('{').count();
    let closes = code_only.matches('}').count();
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    let delta = opens as i32 - closes as i32;

    (
        BraceStats {
            delta,
            leading_close,
        },
        next_in_block_comment,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_open_brace() {
        let (stats, carry) = line_brace_stats("void main() {", false);
        assert_eq!(stats.delta, 1);
        assert_eq!(stats.leading_close, 0);
        assert!(!carry);
    }

    #[test]
    fn test_leading_close() {
        let (stats, _) = line_brace_stats("}", false);
        assert_eq!(stats.delta, -1);
        assert_eq!(stats.leading_close, 1);
    }

    #[test]
    fn test_double_leading_close() {
        let (stats, _) = line_brace_stats("  }} else {", false);
        assert_eq!(stats.delta, -1);
        assert_eq!(stats.leading_close, 2);
    }

    #[test]
    fn test_close_then_open_not_leading() {
        let (stats, _) = line_brace_stats("} else {", false);
        assert_eq!(stats.delta, 0);
        assert_eq!(stats.leading_close, 1);
    }

    #[test]
    fn test_brace_in_string_does_not_count() {
        let (stats, _) = line_brace_stats(r#"foo("}"); {"#, false);
        assert_eq!(stats.delta, 1);
        assert_eq!(stats.leading_close, 0);
    }

    #[test]
    fn test_brace_in_line_comment_does_not_count() {
        let (stats, _) = line_brace_stats("x = 1; // {{{", false);
        assert_eq!(stats.delta, 0);
    }

    #[test]
    fn test_brace_in_block_comment_does_not_count() {
        let (stats, carry) = line_brace_stats("a /* { */ b {", false);
        assert_eq!(stats.delta, 1);
        assert!(!carry);
    }

    #[test]
    fn test_block_comment_carries_across_lines() {
        let (stats, carry) = line_brace_stats("/* start {", false);
        assert_eq!(stats.delta, 0);
        assert!(carry);

        let (stats, carry) = line_brace_stats("still inside }", carry);
        assert_eq!(stats.delta, 0);
        assert!(carry);

        let (stats, carry) = line_brace_stats("end */ {", carry);
        assert_eq!(stats.delta, 1);
        assert!(!carry);
    }

    #[test]
    fn test_close_after_block_comment_still_leading() {
        // The projection left-trims before counting, so a comment followed by
        // a closer still dedents the line.
        let (stats, _) = line_brace_stats("/* note */ }", false);
        assert_eq!(stats.delta, -1);
        assert_eq!(stats.leading_close, 1);
    }
}
