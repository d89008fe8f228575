/// `CodeFilter` - Iterator that filters out comments and strings
///
/// Wraps a string iterator and maintains state about whether we're inside
/// string literals or comments. It is used to make sure brace counting only
/// ever sees actual shader code, not string contents or comment text.
///
/// Comment handling follows the GLSL-like rules of the .frag dialect:
/// `//` terminates the line, `/* ... */` may span lines (the carried state is
/// threaded through [`CodeFilter::with_block_comment_state`]), and no escaping
/// is recognized inside block comments. Strings honor backslash escapes and
/// close on the matching unescaped quote.

/// Type of string delimiter we're currently inside
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringDelimiter {
    #[default]
    None,
    Single, // '...'
    Double, // "..."
}

/// Iterator adapter that yields (position, character) pairs for code only.
///
/// Block comments and line comments are always dropped. String literals are
/// dropped as well when `filter_strings` is set; otherwise they are yielded
/// verbatim (delimiters included) so the projection preserves them.
pub struct CodeFilter<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    state: FilterState,
    filter_strings: bool,
    /// Set once `//` is seen; the rest of the line is dead
    in_line_comment: bool,
}

#[derive(Debug, Default)]
struct FilterState {
    instring: StringDelimiter,
    escaped: bool,
    in_block_comment: bool,
}

impl<'a> CodeFilter<'a> {
    /// Create a new `CodeFilter` starting in plain-code state
    ///
    /// # Arguments
    /// * `content` - The line to iterate over (no embedded newline)
    /// * `filter_strings` - Whether to drop string literals from the output
    #[must_use]
    pub fn new(content: &'a str, filter_strings: bool) -> Self {
        Self::with_block_comment_state(content, filter_strings, false)
    }

    /// Create a `CodeFilter` with initial block-comment state.
    ///
    /// Used when an unterminated `/*` from a previous line means the new line
    /// starts inside a block comment.
    #[must_use]
    pub fn with_block_comment_state(
        content: &'a str,
        filter_strings: bool,
        in_block_comment: bool,
    ) -> Self {
        Self {
            chars: content.char_indices().peekable(),
            state: FilterState {
                instring: StringDelimiter::None,
                escaped: false,
                in_block_comment,
            },
            filter_strings,
            in_line_comment: false,
        }
    }

    /// Check if we ended (or are currently) inside a block comment.
    ///
    /// After the iterator is exhausted this is the state to carry to the
    /// next line.
    #[must_use]
    pub fn in_block_comment(&self) -> bool {
        self.state.in_block_comment
    }

    /// Check if we're currently inside a string
    #[must_use]
    pub fn instring(&self) -> bool {
        self.state.instring != StringDelimiter::None
    }

    /// Get the filtered content as a string
    ///
    /// Pre-allocates the result string based on the input size for efficiency.
    pub fn filter_all(&mut self) -> String {
        // Pre-allocate based on remaining chars (filtering only reduces size)
        let size_hint = self.chars.size_hint().0;
        let mut result = String::with_capacity(size_hint);
        for (_, c) in self.by_ref() {
            result.push(c);
        }
        result
    }

    /// Peek at the next character without consuming
    fn peek_next_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }
}

impl Iterator for CodeFilter<'_> {
    type Item = (usize, char);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.in_line_comment {
                return None;
            }

            let (pos, c) = self.chars.next()?;

            // Inside a block comment: only `*/` matters, everything else is dropped
            if self.state.in_block_comment {
                if c == '*' && self.peek_next_char() == Some('/') {
                    self.chars.next(); // consume the '/'
                    self.state.in_block_comment = false;
                }
                continue;
            }

            // Inside a string: track escapes and the closing quote
            if self.state.instring != StringDelimiter::None {
                if self.state.escaped {
                    self.state.escaped = false;
                } else if c == '\\' {
                    self.state.escaped = true;
                } else if (c == '\'' && self.state.instring == StringDelimiter::Single)
                    || (c == '"' && self.state.instring == StringDelimiter::Double)
                {
                    self.state.instring = StringDelimiter::None;
                }
                if self.filter_strings {
                    continue;
                }
                return Some((pos, c));
            }

            // Plain code
            match c {
                '\'' => {
                    self.state.instring = StringDelimiter::Single;
                    if self.filter_strings {
                        continue;
                    }
                    return Some((pos, c));
                }
                '"' => {
                    self.state.instring = StringDelimiter::Double;
                    if self.filter_strings {
                        continue;
                    }
                    return Some((pos, c));
                }
                '/' if self.peek_next_char() == Some('/') => {
                    // Line comment: everything from here is dropped
                    self.in_line_comment = true;
                    return None;
                }
                '/' if self.peek_next_char() == Some('*') => {
                    self.chars.next(); // consume the '*'
                    self.state.in_block_comment = true;
                    continue;
                }
                _ => return Some((pos, c)),
            }
        }
    }
}
