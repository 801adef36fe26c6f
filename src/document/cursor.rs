//! Path cursors over a loaded YAML document.
//!
//! `NodeRef` points into a `YamlNode` tree without copying it. Results that
//! do not exist in the document, such as the sequence produced by
//! `users.name`, are held as a list of cursors.

use std::borrow::Cow;

use super::node::{YamlNode, YamlValue};
use crate::yamlpath::{NodeKind, PathNode};

/// A cursor for resolving path expressions against a document.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeRef<'a> {
    /// A node of the document.
    Node(&'a YamlNode),
    /// A sequence built from selected nodes.
    Collected(Vec<NodeRef<'a>>),
    /// No value at all.
    Undefined,
}

impl<'a> NodeRef<'a> {
    /// Returns the document node this cursor points at, if any.
    pub fn node(&self) -> Option<&'a YamlNode> {
        match self {
            NodeRef::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<&'a YamlValue> {
        self.node().map(YamlNode::value)
    }

    /// Converts the selected value into a `serde_yaml::Value` for output.
    ///
    /// The undefined cursor converts to `Null`.
    pub fn to_serde_value(&self) -> serde_yaml::Value {
        match self {
            NodeRef::Node(node) => value_to_serde(node.value()),
            NodeRef::Collected(items) => {
                serde_yaml::Value::Sequence(items.iter().map(NodeRef::to_serde_value).collect())
            }
            NodeRef::Undefined => serde_yaml::Value::Null,
        }
    }
}

impl<'a> From<&'a YamlNode> for NodeRef<'a> {
    fn from(node: &'a YamlNode) -> Self {
        NodeRef::Node(node)
    }
}

fn value_to_serde(value: &YamlValue) -> serde_yaml::Value {
    use super::node::YamlNumber;

    match value {
        YamlValue::Object(entries) => {
            let map: serde_yaml::Mapping = entries
                .iter()
                .map(|(k, v)| (serde_yaml::Value::String(k.clone()), value_to_serde(v.value())))
                .collect();
            serde_yaml::Value::Mapping(map)
        }
        YamlValue::Array(elements) | YamlValue::MultiDoc(elements) => {
            serde_yaml::Value::Sequence(elements.iter().map(|v| value_to_serde(v.value())).collect())
        }
        YamlValue::String(s) => serde_yaml::Value::String(s.clone()),
        YamlValue::Number(YamlNumber::Integer(i)) => {
            serde_yaml::Value::Number(serde_yaml::Number::from(*i))
        }
        YamlValue::Number(YamlNumber::Float(f)) => {
            serde_yaml::Value::Number(serde_yaml::Number::from(*f))
        }
        YamlValue::Boolean(b) => serde_yaml::Value::Bool(*b),
        YamlValue::Null => serde_yaml::Value::Null,
    }
}

impl<'a> PathNode for NodeRef<'a> {
    fn kind(&self) -> NodeKind {
        match self {
            NodeRef::Node(node) => match node.value() {
                YamlValue::Object(_) => NodeKind::Map,
                // every document of a multi-document file is an element
                YamlValue::Array(_) | YamlValue::MultiDoc(_) => NodeKind::Sequence,
                YamlValue::String(_) | YamlValue::Number(_) | YamlValue::Boolean(_) => {
                    NodeKind::Scalar
                }
                YamlValue::Null => NodeKind::Null,
            },
            NodeRef::Collected(_) => NodeKind::Sequence,
            NodeRef::Undefined => NodeKind::Undefined,
        }
    }

    fn len(&self) -> usize {
        match self {
            NodeRef::Node(node) => match node.value() {
                YamlValue::Object(entries) => entries.len(),
                YamlValue::Array(elements) | YamlValue::MultiDoc(elements) => elements.len(),
                _ => 0,
            },
            NodeRef::Collected(items) => items.len(),
            NodeRef::Undefined => 0,
        }
    }

    fn get(&self, key: &str) -> Option<Self> {
        match self.value()? {
            YamlValue::Object(entries) => entries.get(key).map(NodeRef::Node),
            _ => None,
        }
    }

    fn at(&self, index: usize) -> Option<Self> {
        match self {
            NodeRef::Node(node) => match node.value() {
                YamlValue::Array(elements) | YamlValue::MultiDoc(elements) => {
                    elements.get(index).map(NodeRef::Node)
                }
                _ => None,
            },
            NodeRef::Collected(items) => items.get(index).cloned(),
            NodeRef::Undefined => None,
        }
    }

    fn scalar(&self) -> Option<Cow<'_, str>> {
        self.node()?.scalar_text()
    }

    fn sequence(items: Vec<Self>) -> Self {
        NodeRef::Collected(items)
    }

    fn undefined() -> Self {
        NodeRef::Undefined
    }
}
