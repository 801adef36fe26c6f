//! Selector-level parser for path expressions.
//!
//! The parser pulls tokens from the [`Lexer`] and groups them into
//! [`Selector`]s, one per call to [`SelectorParser::next_selector`]. Which
//! tokens are accepted depends on the position in the path:
//!
//! - at the start of a selector: end of path, `[`, or an identifier
//! - right after a selector: additionally `.`, which then requires another
//!   selector to follow
//! - inside brackets: an index (`[3]`), an existence filter (`[key]`,
//!   `[key=]`) or an equality filter (`[key=value]`)
//!
//! Errors are sticky. After the first one every call returns
//! [`Selector::Invalid`] without scanning further.

use super::ast::Selector;
use super::error::{PathError, PathException};
use super::lexer::{Lexer, Token, TokenKind};

const AT_START: &[TokenKind] = &[
    TokenKind::EndOfInput,
    TokenKind::OpenBracket,
    TokenKind::QuotedIdentifier,
    TokenKind::UnquotedIdentifier,
];

const AFTER_SELECTOR: &[TokenKind] = &[
    TokenKind::EndOfInput,
    TokenKind::OpenBracket,
    TokenKind::QuotedIdentifier,
    TokenKind::UnquotedIdentifier,
    TokenKind::Period,
];

const IDENTIFIERS: &[TokenKind] = &[TokenKind::UnquotedIdentifier, TokenKind::QuotedIdentifier];

const FILTER_VALUE: &[TokenKind] = &[
    TokenKind::QuotedIdentifier,
    TokenKind::UnquotedIdentifier,
    TokenKind::CloseBracket,
];

enum IndexParse {
    Index(usize),
    Overflow,
    NotNumeric,
}

/// Parses an all-digit token. Any non-digit makes the token a filter key.
fn parse_index(text: &str) -> IndexParse {
    let mut value: usize = 0;
    for b in text.bytes() {
        if !b.is_ascii_digit() {
            return IndexParse::NotNumeric;
        }
        let digit = usize::from(b - b'0');
        value = match value.checked_mul(10).and_then(|v| v.checked_add(digit)) {
            Some(v) => v,
            None => return IndexParse::Overflow,
        };
    }
    IndexParse::Index(value)
}

/// Pull parser turning a path string into [`Selector`]s.
#[derive(Debug, Clone)]
pub struct SelectorParser<'a> {
    lexer: Lexer<'a>,
    pending: Option<Token<'a>>,
    period_allowed: bool,
    selector_required: bool,
    valid_end: usize,
    finished: bool,
}

impl<'a> SelectorParser<'a> {
    pub fn new(path: &'a str) -> Self {
        Self {
            lexer: Lexer::new(path),
            pending: None,
            period_allowed: false,
            selector_required: false,
            valid_end: 0,
            finished: false,
        }
    }

    /// The unparsed rest of the path.
    pub fn remainder(&self) -> &'a str {
        self.lexer.remainder()
    }

    /// Byte offset of the scan position in the original path.
    pub fn offset(&self) -> usize {
        self.lexer.offset()
    }

    /// The part of the path up to the end of the last complete selector.
    pub fn valid(&self) -> &'a str {
        self.lexer.input()[..self.valid_end].trim_end()
    }

    /// True when the whole path has been scanned, or scanning has failed.
    pub fn is_exhausted(&self) -> bool {
        self.lexer.is_exhausted()
    }

    /// The sticky diagnostic, if parsing has failed.
    pub fn error(&self) -> Option<&PathException> {
        self.lexer.error()
    }

    /// Parses the next selector.
    ///
    /// Returns [`Selector::None`] at the clean end of the path and
    /// [`Selector::Invalid`] once an error has been recorded.
    pub fn next_selector(&mut self) -> Selector<'a> {
        if self.lexer.error().is_some() {
            return Selector::Invalid;
        }
        self.parse_selector().unwrap_or(Selector::Invalid)
    }

    fn parse_selector(&mut self) -> Option<Selector<'a>> {
        if self.period_allowed {
            let token = self.expect(AFTER_SELECTOR, PathError::InvalidToken)?;
            self.period_allowed = false;
            if token.kind == TokenKind::Period {
                // the path cannot end right after a period
                self.selector_required = true;
            } else {
                self.pending = Some(token);
            }
        }

        let token = self.expect(AT_START, PathError::InvalidToken)?;
        match token.kind {
            TokenKind::EndOfInput => {
                if self.selector_required {
                    self.lexer.fail(PathError::UnexpectedEnd, token.text);
                    return None;
                }
                Some(Selector::None)
            }
            TokenKind::QuotedIdentifier | TokenKind::UnquotedIdentifier => {
                Some(self.finish(Selector::Key(token.text)))
            }
            TokenKind::OpenBracket => self.parse_bracket(),
            _ => {
                self.lexer.fail(PathError::Internal, token.text);
                None
            }
        }
    }

    /// Parses the inside of `[...]`; the open bracket is already consumed.
    fn parse_bracket(&mut self) -> Option<Selector<'a>> {
        let token = self.expect(IDENTIFIERS, PathError::InvalidIndex)?;

        if token.kind == TokenKind::UnquotedIdentifier {
            match parse_index(token.text) {
                IndexParse::Index(index) => {
                    self.expect(&[TokenKind::CloseBracket], PathError::InvalidToken)?;
                    return Some(self.finish(Selector::Index(index)));
                }
                IndexParse::Overflow => {
                    self.lexer.fail(PathError::InvalidIndex, token.text);
                    return None;
                }
                IndexParse::NotNumeric => {}
            }
        }

        let key = token.text;
        let token = self.expect(
            &[TokenKind::Equal, TokenKind::CloseBracket],
            PathError::InvalidToken,
        )?;
        let mut value = None;
        if token.kind == TokenKind::Equal {
            let operand = self.expect(FILTER_VALUE, PathError::InvalidToken)?;
            if operand.kind != TokenKind::CloseBracket {
                self.expect(&[TokenKind::CloseBracket], PathError::InvalidToken)?;
                value = Some(operand.text);
            }
        }
        Some(self.finish(Selector::Filter { key, value }))
    }

    /// Takes the next token and checks it against `valid`, failing with
    /// `error` otherwise.
    fn expect(&mut self, valid: &[TokenKind], error: PathError) -> Option<Token<'a>> {
        let token = match self.pending.take() {
            Some(token) => token,
            None => self.lexer.next_token(),
        };
        if valid.contains(&token.kind) {
            return Some(token);
        }
        self.lexer.fail(error, token.text);
        None
    }

    fn finish(&mut self, selector: Selector<'a>) -> Selector<'a> {
        self.period_allowed = true;
        self.selector_required = false;
        self.valid_end = self.lexer.offset();
        selector
    }
}

impl<'a> Iterator for SelectorParser<'a> {
    type Item = Result<Selector<'a>, PathException>;

    /// Yields selectors up to the clean end of the path, or a single error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_selector() {
            Selector::None => {
                self.finished = true;
                None
            }
            Selector::Invalid => {
                self.finished = true;
                let err = self.error().cloned().unwrap_or_else(|| {
                    PathException::new(PathError::Internal, self.offset(), self.remainder())
                });
                Some(Err(err))
            }
            selector => Some(Ok(selector)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_all(path: &str) -> Result<Vec<Selector<'_>>, PathException> {
        SelectorParser::new(path).collect()
    }

    fn parse_err(path: &str) -> PathException {
        parse_all(path).expect_err("expected a parse error")
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!(
            parse_all("a.b.c").unwrap(),
            vec![Selector::Key("a"), Selector::Key("b"), Selector::Key("c")]
        );
    }

    #[test]
    fn test_parse_adjacent_keys_without_period() {
        // a quoted key may directly follow a selector
        assert_eq!(
            parse_all("a'b c'").unwrap(),
            vec![Selector::Key("a"), Selector::Key("b c")]
        );
    }

    #[test]
    fn test_parse_index() {
        assert_eq!(
            parse_all("items[0]").unwrap(),
            vec![Selector::Key("items"), Selector::Index(0)]
        );
        assert_eq!(
            parse_all("items.[12]").unwrap(),
            vec![Selector::Key("items"), Selector::Index(12)]
        );
        assert_eq!(parse_all("[3][4]").unwrap(), vec![Selector::Index(3), Selector::Index(4)]);
    }

    #[test]
    fn test_parse_filters() {
        assert_eq!(
            parse_all("users[active=true]").unwrap(),
            vec![
                Selector::Key("users"),
                Selector::Filter {
                    key: "active",
                    value: Some("true")
                }
            ]
        );
        assert_eq!(
            parse_all("[id]").unwrap(),
            vec![Selector::Filter {
                key: "id",
                value: None
            }]
        );
        assert_eq!(
            parse_all("[id=]").unwrap(),
            vec![Selector::Filter {
                key: "id",
                value: None
            }]
        );
        assert_eq!(
            parse_all("['first name'=\"Ann Lee\"]").unwrap(),
            vec![Selector::Filter {
                key: "first name",
                value: Some("Ann Lee")
            }]
        );
    }

    #[test]
    fn test_quoted_digits_are_a_filter_key() {
        assert_eq!(
            parse_all("['0']").unwrap(),
            vec![Selector::Filter {
                key: "0",
                value: None
            }]
        );
    }

    #[test]
    fn test_mixed_token_is_a_filter_key() {
        assert_eq!(
            parse_all("[1a]").unwrap(),
            vec![Selector::Filter {
                key: "1a",
                value: None
            }]
        );
    }

    #[test]
    fn test_empty_path() {
        assert_eq!(parse_all("").unwrap(), vec![]);
        assert_eq!(parse_all("   ").unwrap(), vec![]);
    }

    #[test]
    fn test_double_period_is_invalid_token() {
        let err = parse_err("a..b");
        assert_eq!(err.kind(), PathError::InvalidToken);
        assert_eq!(err.offset(), 3);
        assert_eq!(err.text(), ".");
    }

    #[test]
    fn test_dangling_period_is_unexpected_end() {
        let err = parse_err("a.");
        assert_eq!(err.kind(), PathError::UnexpectedEnd);
        assert_eq!(err.offset(), 2);
    }

    #[test]
    fn test_leading_period_is_invalid() {
        assert_eq!(parse_err(".a").kind(), PathError::InvalidToken);
    }

    #[test]
    fn test_bracket_errors() {
        assert_eq!(parse_err("[").kind(), PathError::InvalidIndex);
        assert_eq!(parse_err("[]").kind(), PathError::InvalidIndex);
        assert_eq!(parse_err("[0").kind(), PathError::InvalidToken);
        assert_eq!(parse_err("[a=b").kind(), PathError::InvalidToken);
        assert_eq!(parse_err("[a b]").kind(), PathError::InvalidToken);
        assert_eq!(parse_err("]").kind(), PathError::InvalidToken);
    }

    #[test]
    fn test_index_overflow() {
        let err = parse_err("[99999999999999999999999999]");
        assert_eq!(err.kind(), PathError::InvalidIndex);
        assert_eq!(err.text(), "99999999999999999999999999");
    }

    #[test]
    fn test_largest_index_fits() {
        let path = format!("[{}]", usize::MAX);
        assert_eq!(parse_all(&path).unwrap(), vec![Selector::Index(usize::MAX)]);

        let path = format!("[{}9]", usize::MAX);
        assert_eq!(parse_err(&path).kind(), PathError::InvalidIndex);
    }

    #[test]
    fn test_unterminated_quote() {
        let err = parse_err("a.'b");
        assert_eq!(err.kind(), PathError::InvalidToken);
        assert_eq!(err.offset(), 2);
        assert_eq!(err.text(), "'b");

        assert_eq!(parse_err("['b").kind(), PathError::InvalidIndex);
    }

    #[test]
    fn test_errors_are_sticky() {
        let mut parser = SelectorParser::new("a..b.c");
        assert_eq!(parser.next_selector(), Selector::Key("a"));
        assert_eq!(parser.next_selector(), Selector::Invalid);
        let offset = parser.offset();
        assert_eq!(parser.next_selector(), Selector::Invalid);
        assert_eq!(parser.next_selector(), Selector::Invalid);
        assert_eq!(parser.offset(), offset);
        assert_eq!(parser.error().unwrap().kind(), PathError::InvalidToken);
    }

    #[test]
    fn test_none_after_last_selector() {
        let mut parser = SelectorParser::new("a.b ");
        assert_eq!(parser.next_selector(), Selector::Key("a"));
        assert_eq!(parser.next_selector(), Selector::Key("b"));
        assert!(parser.is_exhausted());
        assert_eq!(parser.next_selector(), Selector::None);
        assert_eq!(parser.next_selector(), Selector::None);
    }

    #[test]
    fn test_valid_prefix_tracks_complete_selectors() {
        let mut parser = SelectorParser::new("users[0] .name.");
        parser.next_selector();
        parser.next_selector();
        assert_eq!(parser.valid(), "users[0]");
        parser.next_selector();
        assert_eq!(parser.valid(), "users[0] .name");
        assert_eq!(parser.next_selector(), Selector::Invalid);
        assert_eq!(parser.valid(), "users[0] .name");
    }

    #[test]
    fn test_whitespace_inside_brackets() {
        assert_eq!(
            parse_all(" a [ k = v ] ").unwrap(),
            vec![
                Selector::Key("a"),
                Selector::Filter {
                    key: "k",
                    value: Some("v")
                }
            ]
        );
    }
}
