use super::ast::Selector;
use super::error::{PathError, PathException};
use super::node::{NodeKind, PathNode};
use super::parser::SelectorParser;

/// Applies a path expression to a node cursor, one selector at a time.
///
/// The cursor is only ever reassigned; the tree it points into is never
/// modified. On failure the cursor stays at the last node that matched and
/// [`Evaluator::remainder`] holds the path from the failing selector on.
pub struct Evaluator<'a> {
    input: &'a str,
    parser: SelectorParser<'a>,
    remainder: &'a str,
}

impl<'a> Evaluator<'a> {
    pub fn new(path: &'a str) -> Self {
        Evaluator {
            input: path,
            parser: SelectorParser::new(path),
            remainder: path,
        }
    }

    /// The part of the path that has not been applied.
    pub fn remainder(&self) -> &'a str {
        self.remainder
    }

    /// Byte offset of [`Evaluator::remainder`] in the original path.
    pub fn offset(&self) -> usize {
        self.input.len() - self.remainder.len()
    }

    /// Resolves the whole path against `node`.
    pub fn run<N: PathNode>(&mut self, node: &mut N) -> Result<(), PathException> {
        loop {
            let before = self.parser.remainder();
            self.remainder = before;

            if self.parser.is_exhausted() {
                break;
            }
            if !node.is_defined() {
                return Err(self.fail(PathError::NodeNotFound, before.trim_end()));
            }

            let selector = self.parser.next_selector();
            let consumed = before.len() - self.parser.remainder().len();
            let text = before[..consumed].trim_end();

            match selector {
                Selector::None => break,
                Selector::Invalid => return Err(self.parse_error()),
                step => {
                    if let Err(kind) = apply(node, step) {
                        return Err(self.fail(kind, text));
                    }
                    log::trace!("applied {} at {}: now at {}", step, self.offset(), node.kind());
                }
            }
        }

        if self.parser.error().is_some() {
            return Err(self.parse_error());
        }
        self.remainder = self.parser.remainder();
        Ok(())
    }

    fn parse_error(&self) -> PathException {
        let err = self.parser.error().cloned().unwrap_or_else(|| {
            PathException::new(PathError::Internal, self.parser.offset(), self.remainder)
        });
        log::debug!("path '{}' rejected: {}", self.input, err);
        err
    }

    fn fail(&self, kind: PathError, text: &str) -> PathException {
        let err = PathException::new(kind, self.offset(), text);
        log::debug!("path '{}' did not resolve: {}", self.input, err);
        err
    }
}

/// Applies one selector to the cursor.
pub(crate) fn apply<N: PathNode>(node: &mut N, selector: Selector<'_>) -> Result<(), PathError> {
    match selector {
        Selector::Key(key) => select_key(node, key),
        Selector::Index(index) => select_index(node, index),
        Selector::Filter { key, value } => filter(node, key, value),
        Selector::None | Selector::Invalid => Err(PathError::Internal),
    }
}

/// Empty containers and nulls count as "not found".
fn is_match<N: PathNode>(node: &N) -> bool {
    match node.kind() {
        NodeKind::Map | NodeKind::Sequence => !node.is_empty(),
        NodeKind::Scalar => true,
        NodeKind::Null | NodeKind::Undefined => false,
    }
}

fn select_key<N: PathNode>(node: &mut N, key: &str) -> Result<(), PathError> {
    let found = match node.kind() {
        NodeKind::Map => node.get(key).unwrap_or_else(N::undefined),
        NodeKind::Sequence => {
            // non-map elements are skipped
            let values: Vec<N> = node
                .elements()
                .iter()
                .filter(|el| el.is_map())
                .filter_map(|el| el.get(key))
                .filter(|value| value.is_defined())
                .collect();
            N::sequence(values)
        }
        _ => return Err(PathError::InvalidNodeType),
    };

    if !is_match(&found) {
        return Err(PathError::NodeNotFound);
    }
    *node = found;
    Ok(())
}

fn select_index<N: PathNode>(node: &mut N, index: usize) -> Result<(), PathError> {
    match node.kind() {
        // [0] sticks to a scalar
        NodeKind::Scalar if index == 0 => Ok(()),
        NodeKind::Scalar => Err(PathError::NodeNotFound),
        NodeKind::Sequence => {
            let element = node.at(index).ok_or(PathError::NodeNotFound)?;
            *node = element;
            Ok(())
        }
        _ => Err(PathError::InvalidNodeType),
    }
}

fn filter_matches<N: PathNode>(element: &N, key: &str, value: Option<&str>) -> bool {
    if !element.is_map() {
        return false;
    }
    let Some(field) = element.get(key) else {
        return false;
    };
    if !field.is_scalar() {
        return false;
    }
    match value {
        None => true,
        Some(expected) => field.scalar().is_some_and(|text| text == expected),
    }
}

fn filter<N: PathNode>(node: &mut N, key: &str, value: Option<&str>) -> Result<(), PathError> {
    match node.kind() {
        NodeKind::Map => {
            if filter_matches(node, key, value) {
                Ok(())
            } else {
                Err(PathError::NodeNotFound)
            }
        }
        NodeKind::Sequence => {
            let matched: Vec<N> = node
                .elements()
                .into_iter()
                .filter(|el| filter_matches(el, key, value))
                .collect();
            if matched.is_empty() {
                return Err(PathError::NodeNotFound);
            }
            *node = N::sequence(matched);
            Ok(())
        }
        _ => Err(PathError::InvalidNodeType),
    }
}
