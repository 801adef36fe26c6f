//! Error types for path scanning and resolution.
//!
//! Every failure is described by a [`PathException`]: the error kind, the
//! scan offset in the original path string, and the offending text. The same
//! diagnostic can be turned into a [`PathFailure`], which has one variant per
//! error kind for callers that prefer `?` propagation over error codes.

use std::fmt;

/// The kind of a path error.
///
/// `InvalidToken`, `InvalidIndex` and `UnexpectedEnd` are syntax errors
/// raised while scanning. `InvalidNodeType` and `NodeNotFound` are raised
/// while resolving against a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PathError {
    /// No error.
    #[default]
    None,
    /// A state the grammar should never reach.
    Internal,
    /// A token that is not valid at this point of the path.
    InvalidToken,
    /// A bracket that does not contain a valid index or filter.
    InvalidIndex,
    /// The selector cannot be applied to the current node kind.
    InvalidNodeType,
    /// No node matches the selector.
    NodeNotFound,
    /// The path ends where another selector is required.
    UnexpectedEnd,
}

impl PathError {
    /// Returns a short human-readable description of the kind.
    pub fn description(self) -> &'static str {
        match self {
            PathError::None => "(none)",
            PathError::Internal => "(internal, please report)",
            PathError::InvalidToken => "invalid token",
            PathError::InvalidIndex => "invalid index",
            PathError::InvalidNodeType => "selector cannot match node type",
            PathError::NodeNotFound => "no node matches selector",
            PathError::UnexpectedEnd => "unexpected end of path",
        }
    }

    /// Returns true for errors detected while scanning the path text.
    pub fn is_syntax(self) -> bool {
        matches!(
            self,
            PathError::InvalidToken | PathError::InvalidIndex | PathError::UnexpectedEnd
        )
    }

    /// Returns true for errors detected while matching against a node.
    pub fn is_resolution(self) -> bool {
        matches!(self, PathError::InvalidNodeType | PathError::NodeNotFound)
    }

    pub fn is_none(self) -> bool {
        self == PathError::None
    }
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A structured path diagnostic.
///
/// Once constructed the diagnostic cannot be changed. It carries everything
/// needed to render a message without scanning the path again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathException {
    kind: PathError,
    offset: usize,
    text: String,
}

impl PathException {
    pub fn new(kind: PathError, offset: usize, text: impl Into<String>) -> Self {
        Self {
            kind,
            offset,
            text: text.into(),
        }
    }

    pub fn kind(&self) -> PathError {
        self.kind
    }

    /// Byte offset from the start of the original path string.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The offending part of the path.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Renders `path` followed by a line with a caret under the error offset.
    ///
    /// The caret column counts characters, so multi-byte input lines up in a
    /// terminal.
    pub fn caret(&self, path: &str) -> String {
        let offset = self.offset.min(path.len());
        let column = path
            .char_indices()
            .take_while(|(idx, _)| *idx < offset)
            .count();
        format!("{}\n{}^", path, " ".repeat(column))
    }

    /// Converts the diagnostic into its kind-specific error.
    ///
    /// Returns `None` for a diagnostic of kind [`PathError::None`].
    pub fn into_failure(self) -> Option<PathFailure> {
        let PathException { kind, offset, text } = self;
        let failure = match kind {
            PathError::None => return None,
            PathError::Internal => PathFailure::Internal { offset, text },
            PathError::InvalidToken => PathFailure::InvalidToken { offset, text },
            PathError::InvalidIndex => PathFailure::InvalidIndex { offset, text },
            PathError::InvalidNodeType => PathFailure::InvalidNodeType { offset, text },
            PathError::NodeNotFound => PathFailure::NodeNotFound { offset, text },
            PathError::UnexpectedEnd => PathFailure::UnexpectedEnd { offset, text },
        };
        Some(failure)
    }
}

impl fmt::Display for PathException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (offset, text) = (self.offset, &self.text);
        match self.kind {
            PathError::None => write!(f, "OK"),
            PathError::Internal => write!(f, "internal error at position {}: {}", offset, text),
            PathError::InvalidToken => write!(f, "Invalid Token at position {}: {}", offset, text),
            PathError::InvalidIndex => write!(f, "Index expected at position {}: {}", offset, text),
            PathError::UnexpectedEnd => {
                write!(f, "unexpected end of path at position {}: {}", offset, text)
            }
            PathError::InvalidNodeType => {
                write!(f, "node type mismatch at path position {}: {}", offset, text)
            }
            PathError::NodeNotFound => {
                write!(f, "node not found at path position {}: {}", offset, text)
            }
        }
    }
}

impl std::error::Error for PathException {}

/// Kind-specific path errors, one variant per [`PathError`] kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathFailure {
    #[error("internal error at position {offset}: {text}")]
    Internal { offset: usize, text: String },

    #[error("Invalid Token at position {offset}: {text}")]
    InvalidToken { offset: usize, text: String },

    #[error("Index expected at position {offset}: {text}")]
    InvalidIndex { offset: usize, text: String },

    #[error("unexpected end of path at position {offset}: {text}")]
    UnexpectedEnd { offset: usize, text: String },

    #[error("node type mismatch at path position {offset}: {text}")]
    InvalidNodeType { offset: usize, text: String },

    #[error("node not found at path position {offset}: {text}")]
    NodeNotFound { offset: usize, text: String },
}

impl PathFailure {
    pub fn kind(&self) -> PathError {
        match self {
            PathFailure::Internal { .. } => PathError::Internal,
            PathFailure::InvalidToken { .. } => PathError::InvalidToken,
            PathFailure::InvalidIndex { .. } => PathError::InvalidIndex,
            PathFailure::UnexpectedEnd { .. } => PathError::UnexpectedEnd,
            PathFailure::InvalidNodeType { .. } => PathError::InvalidNodeType,
            PathFailure::NodeNotFound { .. } => PathError::NodeNotFound,
        }
    }

    pub fn offset(&self) -> usize {
        match self {
            PathFailure::Internal { offset, .. }
            | PathFailure::InvalidToken { offset, .. }
            | PathFailure::InvalidIndex { offset, .. }
            | PathFailure::UnexpectedEnd { offset, .. }
            | PathFailure::InvalidNodeType { offset, .. }
            | PathFailure::NodeNotFound { offset, .. } => *offset,
        }
    }
}

impl From<PathFailure> for PathException {
    fn from(failure: PathFailure) -> Self {
        let kind = failure.kind();
        match failure {
            PathFailure::Internal { offset, text }
            | PathFailure::InvalidToken { offset, text }
            | PathFailure::InvalidIndex { offset, text }
            | PathFailure::UnexpectedEnd { offset, text }
            | PathFailure::InvalidNodeType { offset, text }
            | PathFailure::NodeNotFound { offset, text } => PathException::new(kind, offset, text),
        }
    }
}
