//! Path expressions for locating values in YAML documents.
//!
//! A path is a sequence of selectors applied to a node cursor:
//!
//! - `name`, `'quoted name'` - map lookup; over a sequence of maps the key
//!   is looked up in every element and the results are collected
//! - `[3]` - sequence index; `[0]` on a scalar yields the scalar itself
//! - `[key]`, `[key=]` - keep maps that have a scalar `key`
//! - `[key=value]` - keep maps whose scalar `key` equals `value`
//!
//! Selectors are separated by `.`, which is optional before `[` and before
//! a quoted key.
//!
//! # Examples
//!
//! ```
//! // users[0].name             - name of the first user
//! // users[active=true].name   - names of all active users
//! // users.name                - names of all users
//! // 'key with spaces'.value
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod node;
pub mod parser;

pub use ast::Selector;
pub use error::{PathError, PathException, PathFailure};
pub use evaluator::Evaluator;
pub use lexer::{Lexer, Token, TokenKind};
pub use node::{NodeKind, PathNode};
pub use parser::SelectorParser;

/// Result of checking a path's syntax with [`validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation<'a> {
    /// The error kind, `PathError::None` for a valid path.
    pub error: PathError,
    /// The unscanned part of the path; empty for a valid path.
    pub remainder: &'a str,
    /// Scan offset where validation stopped.
    pub offset: usize,
    /// The path up to the end of the last complete selector.
    pub valid: &'a str,
    exception: Option<PathException>,
}

impl Validation<'_> {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// The full diagnostic for an invalid path.
    pub fn exception(&self) -> Option<&PathException> {
        self.exception.as_ref()
    }

    /// Converts the validation into the kind-specific error view.
    pub fn into_result(self) -> Result<(), PathFailure> {
        match self.exception.and_then(PathException::into_failure) {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }
}

/// Checks the syntax of `path` without resolving it.
pub fn validate(path: &str) -> Validation<'_> {
    let mut parser = SelectorParser::new(path);
    while !parser.is_exhausted() {
        if parser.next_selector() == Selector::Invalid {
            break;
        }
    }

    let exception = parser.error().cloned();
    Validation {
        error: exception.as_ref().map_or(PathError::None, PathException::kind),
        remainder: parser.remainder(),
        offset: parser.offset(),
        valid: parser.valid(),
        exception,
    }
}

/// Resolves `path` against `node`, moving the cursor to the match.
///
/// `path` is set to the part that was not applied: empty on success, or the
/// path from the failing selector on. On failure `node` stays at the last
/// node that matched.
pub fn resolve<N: PathNode>(node: &mut N, path: &mut &str) -> PathError {
    let mut evaluator = Evaluator::new(*path);
    let result = evaluator.run(node);
    *path = evaluator.remainder();
    match result {
        Ok(()) => PathError::None,
        Err(err) => err.kind(),
    }
}

/// Like [`resolve`], but returns the full diagnostic.
pub fn try_resolve<N: PathNode>(node: &mut N, path: &str) -> Result<(), PathException> {
    Evaluator::new(path).run(node)
}

/// Returns the node `path` selects from `root`, or the undefined sentinel
/// if the path does not resolve completely.
pub fn select<N: PathNode>(root: N, path: &str) -> N {
    let mut node = root;
    let mut rest = path;
    resolve(&mut node, &mut rest);
    if rest.is_empty() {
        node
    } else {
        N::undefined()
    }
}

/// Returns the node `path` selects from `root`, or the kind-specific error.
pub fn try_select<N: PathNode>(root: N, path: &str) -> Result<N, PathFailure> {
    let mut node = root;
    match try_resolve(&mut node, path) {
        Ok(()) => Ok(node),
        Err(err) => Err(err.into_failure().unwrap_or(PathFailure::Internal {
            offset: 0,
            text: path.to_string(),
        })),
    }
}
