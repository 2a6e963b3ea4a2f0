//! # Comment Stripping
//!
//! Removes `//` line comments and `/* */` block comments from JSON-like text
//! so that hand-edited stats files still parse. The pass is lexical: it
//! tracks string literals, so comment markers inside strings such as
//! `"http://example.com"` are left alone.

/// Lexer state while scanning the input.
#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    /// Ordinary JSON text.
    Code,
    /// Inside a string literal.
    Str,
    /// Inside a string literal, right after a backslash.
    StrEscape,
    /// Inside a `//` comment, until end of line.
    LineComment,
    /// Inside a `/* */` comment.
    BlockComment,
}

/// Returns `raw` with every comment removed.
///
/// Line comments are dropped up to (not including) the newline. Block
/// comments are dropped but the newlines inside them are kept, so line
/// numbers in a later parse error still point at the right place. An
/// unterminated block comment runs to the end of the input.
pub fn strip_comments(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut state = State::Code;
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        state = match state {
            State::Code => match c {
                '"' => {
                    out.push(c);
                    State::Str
                }
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    State::LineComment
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    State::BlockComment
                }
                _ => {
                    out.push(c);
                    State::Code
                }
            },
            State::Str => {
                out.push(c);
                match c {
                    '\\' => State::StrEscape,
                    '"' => State::Code,
                    _ => State::Str,
                }
            }
            State::StrEscape => {
                out.push(c);
                State::Str
            }
            State::LineComment => {
                if c == '\n' {
                    out.push(c);
                    State::Code
                } else {
                    State::LineComment
                }
            }
            State::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    State::Code
                } else {
                    if c == '\n' {
                        out.push(c);
                    }
                    State::BlockComment
                }
            }
        };
    }

    out
}
