//! Selector types produced by the selector parser.

use std::fmt;

/// One step of a path expression.
///
/// Keys and filter operands borrow the original path string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<'a> {
    /// End of path reached cleanly.
    None,
    /// Map lookup (`name`, `'quoted name'`)
    Key(&'a str),
    /// Sequence index (`[3]`)
    Index(usize),
    /// Key existence (`[key]`, `[key=]`) or key/value equality (`[key=value]`)
    Filter {
        key: &'a str,
        value: Option<&'a str>,
    },
    /// Parsing failed; the parser holds the diagnostic.
    Invalid,
}

impl Selector<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Selector::None => "(none)",
            Selector::Key(_) => "key",
            Selector::Index(_) => "index",
            Selector::Filter { .. } => "filter",
            Selector::Invalid => "(invalid)",
        }
    }
}

impl fmt::Display for Selector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::None => write!(f, "(none)"),
            Selector::Key(key) => write!(f, "'{}'", key),
            Selector::Index(index) => write!(f, "[{}]", index),
            Selector::Filter { key, value: None } => write!(f, "['{}']", key),
            Selector::Filter {
                key,
                value: Some(value),
            } => write!(f, "['{}'='{}']", key, value),
            Selector::Invalid => write!(f, "(invalid)"),
        }
    }
}
