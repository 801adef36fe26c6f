//! Token scanner for path expressions.
//!
//! The lexer never copies the path: each token borrows a slice of the
//! caller's string, and scanning only shrinks the remaining view. The byte
//! offset of the scan position is always `input.len() - remainder.len()`.

use super::error::{PathError, PathException};

/// Kinds of tokens produced by the [`Lexer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    EndOfInput,
    Period,
    OpenBracket,
    CloseBracket,
    Equal,
    QuotedIdentifier,
    UnquotedIdentifier,
    /// Terminal; no further tokens are produced after it.
    Invalid,
}

impl TokenKind {
    /// Returns the name used for this kind in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::EndOfInput => "end of path",
            TokenKind::Period => "period",
            TokenKind::OpenBracket => "open bracket",
            TokenKind::CloseBracket => "closing bracket",
            TokenKind::Equal => "equal",
            TokenKind::QuotedIdentifier => "quoted identifier",
            TokenKind::UnquotedIdentifier => "unquoted identifier",
            TokenKind::Invalid => "invalid token",
        }
    }
}

/// A single token. `text` is a slice of the original path; for quoted
/// identifiers the quotes are not included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

impl<'a> Token<'a> {
    fn new(kind: TokenKind, text: &'a str) -> Self {
        Self { kind, text }
    }

    pub fn is_identifier(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::QuotedIdentifier | TokenKind::UnquotedIdentifier
        )
    }
}

/// ASCII whitespace as understood by C's `isspace`, which includes `\v`.
fn is_space(b: u8) -> bool {
    b.is_ascii_whitespace() || b == 0x0b
}

/// Bytes that may appear in an unquoted identifier. Non-ASCII bytes always
/// qualify, so a run never ends inside a multi-byte character.
fn is_identifier_byte(b: u8) -> bool {
    !b.is_ascii() || !(is_space(b) || b.is_ascii_punctuation())
}

/// Splits `view` at `offset`, returning the prefix and leaving the rest.
fn split_at<'a>(view: &mut &'a str, offset: usize) -> &'a str {
    let (head, tail) = view.split_at(offset);
    *view = tail;
    head
}

/// Splits off the longest prefix of bytes satisfying `pred`.
fn split_while<'a>(view: &mut &'a str, pred: impl Fn(u8) -> bool) -> &'a str {
    let end = view
        .bytes()
        .position(|b| !pred(b))
        .unwrap_or(view.len());
    split_at(view, end)
}

/// Scanner turning a path string into [`Token`]s.
///
/// The lexer also holds the diagnostic for the whole scan. Once an error is
/// recorded, either by the lexer itself or by the selector parser through
/// [`Lexer::fail`], every call to [`Lexer::next_token`] returns the same
/// `Invalid` token.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    rest: &'a str,
    current: Token<'a>,
    error: Option<PathException>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Self {
            input,
            rest: input,
            current: Token::new(TokenKind::EndOfInput, ""),
            error: None,
        };
        lexer.skip_whitespace();
        lexer
    }

    /// The original input.
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// The part of the input not scanned yet.
    pub fn remainder(&self) -> &'a str {
        self.rest
    }

    /// Byte offset of the scan position.
    pub fn offset(&self) -> usize {
        self.input.len() - self.rest.len()
    }

    /// True when nothing is left to scan or the scan has failed.
    pub fn is_exhausted(&self) -> bool {
        self.rest.is_empty() || self.current.kind == TokenKind::Invalid || self.error.is_some()
    }

    pub fn error(&self) -> Option<&PathException> {
        self.error.as_ref()
    }

    /// Records a sticky error at the current scan offset.
    ///
    /// The first recorded error wins; later calls leave it untouched.
    pub fn fail(&mut self, kind: PathError, text: &str) -> PathError {
        debug_assert!(kind != PathError::None);
        if self.error.is_none() {
            self.error = Some(PathException::new(kind, self.offset(), text));
        }
        self.current = Token::new(TokenKind::Invalid, self.current.text);
        kind
    }

    /// Scans the next token.
    pub fn next_token(&mut self) -> Token<'a> {
        if self.error.is_some() || self.current.kind == TokenKind::Invalid {
            return self.current;
        }

        let Some(&head) = self.rest.as_bytes().first() else {
            return self.set_token(TokenKind::EndOfInput, "");
        };

        let single = match head {
            b'.' => Some(TokenKind::Period),
            b'[' => Some(TokenKind::OpenBracket),
            b']' => Some(TokenKind::CloseBracket),
            b'=' => Some(TokenKind::Equal),
            _ => None,
        };
        if let Some(kind) = single {
            let text = split_at(&mut self.rest, 1);
            return self.set_token(kind, text);
        }

        if head == b'\'' || head == b'"' {
            return match self.rest[1..].find(head as char) {
                Some(pos) => {
                    let quoted = split_at(&mut self.rest, pos + 2);
                    self.set_token(TokenKind::QuotedIdentifier, &quoted[1..=pos])
                }
                None => {
                    // unterminated quote, nothing is consumed
                    self.current = Token::new(TokenKind::Invalid, self.rest);
                    self.current
                }
            };
        }

        let word = split_while(&mut self.rest, is_identifier_byte);
        if word.is_empty() {
            let bad = self.rest.chars().next().map_or(0, char::len_utf8);
            let text = &self.rest[..bad];
            self.fail(PathError::InvalidToken, text);
            return self.current;
        }
        self.set_token(TokenKind::UnquotedIdentifier, word)
    }

    fn set_token(&mut self, kind: TokenKind, text: &'a str) -> Token<'a> {
        self.current = Token::new(kind, text);
        // trailing whitespace is skipped so a finished path reads as exhausted
        self.skip_whitespace();
        self.current
    }

    fn skip_whitespace(&mut self) {
        split_while(&mut self.rest, is_space);
    }
}
