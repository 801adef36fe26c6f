//! The node capability the resolver works against.
//!
//! Any tree can be queried with path expressions by implementing
//! [`PathNode`] for a cheap cursor type over it. The resolver only moves the
//! cursor by assigning a new value through `&mut N`; it never modifies the
//! tree the cursor points into.

use std::borrow::Cow;
use std::fmt;

/// The observable shape of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Map,
    Sequence,
    Scalar,
    Null,
    /// No value at all. Distinct from `Null`.
    Undefined,
}

impl NodeKind {
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Map => "map",
            NodeKind::Sequence => "sequence",
            NodeKind::Scalar => "scalar",
            NodeKind::Null => "(null)",
            NodeKind::Undefined => "(undefined)",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A cursor over a document tree.
///
/// Cloning a cursor must not copy the tree it points into.
pub trait PathNode: Clone {
    fn kind(&self) -> NodeKind;

    /// Number of entries of a map or elements of a sequence, 0 otherwise.
    fn len(&self) -> usize;

    /// Looks up `key` in a map. Returns `None` for absent keys and non-maps.
    fn get(&self, key: &str) -> Option<Self>;

    /// Returns element `index` of a sequence.
    fn at(&self, index: usize) -> Option<Self>;

    /// The string form of a scalar, used for filter comparisons.
    fn scalar(&self) -> Option<Cow<'_, str>>;

    /// Builds a sequence node from collected cursors.
    fn sequence(items: Vec<Self>) -> Self;

    /// The "no result" sentinel.
    fn undefined() -> Self;

    fn is_defined(&self) -> bool {
        self.kind() != NodeKind::Undefined
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_map(&self) -> bool {
        self.kind() == NodeKind::Map
    }

    fn is_sequence(&self) -> bool {
        self.kind() == NodeKind::Sequence
    }

    fn is_scalar(&self) -> bool {
        self.kind() == NodeKind::Scalar
    }

    fn is_null(&self) -> bool {
        self.kind() == NodeKind::Null
    }

    /// The elements of a sequence, in order.
    fn elements(&self) -> Vec<Self> {
        (0..self.len()).filter_map(|idx| self.at(idx)).collect()
    }
}
