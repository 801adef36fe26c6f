//! Path-based access to YAML documents.
//!
//! `YamlTree` owns a parsed document and answers path expressions against it
//! through [`NodeRef`] cursors that borrow from the tree.
//!
//! # Example
//!
//! ```
//! use yamlselect::document::tree::YamlTree;
//! use yamlselect::document::node::YamlNode;
//! use yamlselect::yamlpath::PathNode;
//!
//! let tree = YamlTree::new(YamlNode::object([
//!     ("name", YamlNode::string("Alice")),
//!     ("tags", YamlNode::array([YamlNode::string("admin")])),
//! ]));
//!
//! assert_eq!(tree.select("tags[0]").scalar().unwrap(), "admin");
//! assert!(!tree.select("missing").is_defined());
//! ```

use super::cursor::NodeRef;
use super::node::YamlNode;
use crate::yamlpath::{self, PathException};

/// A complete YAML document tree.
#[derive(Debug, Clone, PartialEq)]
pub struct YamlTree {
    root: YamlNode,
    /// The YAML text the tree was parsed from
    original_source: Option<String>,
}

impl YamlTree {
    /// Creates a new YAML tree with the given root node.
    pub fn new(root: YamlNode) -> Self {
        Self {
            root,
            original_source: None,
        }
    }

    /// Creates a new YAML tree with the given root node and source text.
    pub fn with_source(root: YamlNode, original_source: Option<String>) -> Self {
        Self {
            root,
            original_source,
        }
    }

    /// Returns a reference to the original YAML source, if available.
    pub fn original_source(&self) -> Option<&str> {
        self.original_source.as_deref()
    }

    /// Returns a reference to the root node of the tree.
    pub fn root(&self) -> &YamlNode {
        &self.root
    }

    /// Returns a cursor at the root of the tree.
    pub fn cursor(&self) -> NodeRef<'_> {
        NodeRef::from(&self.root)
    }

    /// Returns the node `path` selects, or [`NodeRef::Undefined`] when the
    /// path is invalid or does not resolve.
    pub fn select(&self, path: &str) -> NodeRef<'_> {
        yamlpath::select(self.cursor(), path)
    }

    /// Resolves `path` against the root.
    ///
    /// # Errors
    ///
    /// Returns the diagnostic of the first selector that could not be parsed
    /// or applied.
    pub fn resolve(&self, path: &str) -> Result<NodeRef<'_>, PathException> {
        let mut node = self.cursor();
        yamlpath::try_resolve(&mut node, path)?;
        Ok(node)
    }
}
