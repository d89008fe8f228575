//! Blank-line collapsing.
//!
//! Runs as the final pass over the formatted lines: consecutive blank lines
//! collapse to one, the start of the file counts as blank-preceded (so
//! leading blanks disappear), and trailing blanks are removed entirely.

/// Collapse blank-line runs in place.
pub fn collapse_blank_lines(lines: &mut Vec<String>) {
    let mut last_blank = true;
    lines.retain(|line| {
        if line.is_empty() {
            let keep = !last_blank;
            last_blank = true;
            keep
        } else {
            last_blank = false;
            true
        }
    });

    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
}
