//! YAML node representation.
//!
//! This module provides the data structures for YAML documents loaded by
//! yamlselect. Each YAML value is wrapped in a `YamlNode`; maps keep their
//! keys in document order.
//!
//! # Example
//!
//! ```
//! use yamlselect::document::node::{YamlNode, YamlValue, YamlNumber};
//! use indexmap::IndexMap;
//!
//! let mut map = IndexMap::new();
//! map.insert("name".to_string(), YamlNode::string("yamlselect"));
//! map.insert("version".to_string(), YamlNode::new(YamlValue::Number(YamlNumber::Integer(1))));
//! let object = YamlNode::new(YamlValue::Object(map));
//!
//! assert!(object.value().is_object());
//! assert_eq!(object.value().scalar_text().as_deref(), None);
//! ```

use indexmap::IndexMap;
use std::borrow::Cow;

/// Represents YAML numbers (integer or float)
#[derive(Debug, Clone, PartialEq)]
pub enum YamlNumber {
    Integer(i64),
    Float(f64),
}

impl std::fmt::Display for YamlNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            YamlNumber::Integer(i) => write!(f, "{}", i),
            YamlNumber::Float(fl) if fl.is_nan() => write!(f, ".nan"),
            YamlNumber::Float(fl) if fl.is_infinite() => {
                write!(f, "{}", if *fl > 0.0 { ".inf" } else { "-.inf" })
            }
            YamlNumber::Float(fl) => write!(f, "{}", fl),
        }
    }
}

/// A YAML value.
///
/// Objects and arrays contain `YamlNode` instances, so the tree is made of
/// nodes all the way down.
#[derive(Debug, Clone, PartialEq)]
pub enum YamlValue {
    /// A YAML mapping, in document order
    Object(IndexMap<String, YamlNode>),
    /// A YAML sequence
    Array(Vec<YamlNode>),
    /// A YAML string
    String(String),
    /// A YAML number (integer or float)
    Number(YamlNumber),
    /// A YAML boolean
    Boolean(bool),
    /// A YAML null value
    Null,
    /// A multi-document YAML file (each document is a YamlNode)
    MultiDoc(Vec<YamlNode>),
}

impl YamlValue {
    /// Returns true if this value is an object.
    pub fn is_object(&self) -> bool {
        matches!(self, YamlValue::Object(_))
    }

    /// Returns true for strings, numbers and booleans.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            YamlValue::String(_) | YamlValue::Number(_) | YamlValue::Boolean(_)
        )
    }

    /// Returns the text of a scalar value rendered from the value itself.
    ///
    /// Numbers and booleans are rendered the way YAML writes them, so
    /// `active: true` yields `"true"`. Nodes loaded from a document prefer
    /// the text as written, see [`YamlNode::scalar_text`].
    ///
    /// ```
    /// use yamlselect::document::node::{YamlValue, YamlNumber};
    ///
    /// assert_eq!(YamlValue::Boolean(true).scalar_text().unwrap(), "true");
    /// assert_eq!(YamlValue::Number(YamlNumber::Integer(7)).scalar_text().unwrap(), "7");
    /// assert!(YamlValue::Null.scalar_text().is_none());
    /// ```
    pub fn scalar_text(&self) -> Option<Cow<'_, str>> {
        match self {
            YamlValue::String(s) => Some(Cow::Borrowed(s.as_str())),
            YamlValue::Number(n) => Some(Cow::Owned(n.to_string())),
            YamlValue::Boolean(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            _ => None,
        }
    }
}

/// A node in a YAML document tree.
#[derive(Debug, Clone, PartialEq)]
pub struct YamlNode {
    pub(crate) value: YamlValue,
    /// Scalar text exactly as written in the source document
    pub(crate) original_formatting: Option<String>,
}

impl YamlNode {
    /// Creates a new `YamlNode` with the given value.
    ///
    /// # Example
    ///
    /// ```
    /// use yamlselect::document::node::{YamlNode, YamlValue};
    ///
    /// let node = YamlNode::new(YamlValue::Boolean(true));
    /// assert!(matches!(node.value(), YamlValue::Boolean(true)));
    /// ```
    pub fn new(value: YamlValue) -> Self {
        Self {
            value,
            original_formatting: None,
        }
    }

    /// Attaches the source text of a scalar.
    pub fn with_original_formatting(mut self, text: impl Into<String>) -> Self {
        self.original_formatting = Some(text.into());
        self
    }

    /// Creates a string node.
    pub fn string(s: impl Into<String>) -> Self {
        Self::new(YamlValue::String(s.into()))
    }

    /// Creates an object node from key/value pairs, keeping their order.
    pub fn object<K: Into<String>>(entries: impl IntoIterator<Item = (K, YamlNode)>) -> Self {
        Self::new(YamlValue::Object(
            entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        ))
    }

    /// Creates an array node.
    pub fn array(elements: impl IntoIterator<Item = YamlNode>) -> Self {
        Self::new(YamlValue::Array(elements.into_iter().collect()))
    }

    pub fn null() -> Self {
        Self::new(YamlValue::Null)
    }

    /// Returns an immutable reference to the node's value.
    pub fn value(&self) -> &YamlValue {
        &self.value
    }

    /// Returns the source text of a loaded scalar, if it was recorded.
    pub fn original_formatting(&self) -> Option<&str> {
        self.original_formatting.as_deref()
    }

    /// Returns the text of a scalar node.
    ///
    /// A scalar loaded from a document keeps its literal, so `id: 007`
    /// yields `"007"` and `ok: True` yields `"True"`.
    ///
    /// ```
    /// use yamlselect::document::node::{YamlNode, YamlValue, YamlNumber};
    ///
    /// let node = YamlNode::new(YamlValue::Number(YamlNumber::Integer(7)))
    ///     .with_original_formatting("007");
    /// assert_eq!(node.scalar_text().unwrap(), "007");
    /// ```
    pub fn scalar_text(&self) -> Option<Cow<'_, str>> {
        if !self.value.is_scalar() {
            return None;
        }
        match &self.original_formatting {
            Some(text) => Some(Cow::Borrowed(text.as_str())),
            None => self.value.scalar_text(),
        }
    }
}

impl From<YamlValue> for YamlNode {
    fn from(value: YamlValue) -> Self {
        YamlNode::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_number_display() {
        assert_eq!(YamlNumber::Integer(42).to_string(), "42");
        assert_eq!(YamlNumber::Float(42.5).to_string(), "42.5");
        assert_eq!(YamlNumber::Float(f64::INFINITY).to_string(), ".inf");
        assert_eq!(YamlNumber::Float(f64::NEG_INFINITY).to_string(), "-.inf");
        assert_eq!(YamlNumber::Float(f64::NAN).to_string(), ".nan");
    }

    #[test]
    fn test_node_scalar_text_prefers_source() {
        let node = YamlNode::new(YamlValue::Number(YamlNumber::Float(1.5)))
            .with_original_formatting("1.50");
        assert_eq!(node.scalar_text().unwrap(), "1.50");
        assert_eq!(node.original_formatting(), Some("1.50"));

        let built = YamlNode::new(YamlValue::Boolean(true));
        assert_eq!(built.scalar_text().unwrap(), "true");

        let null = YamlNode::null().with_original_formatting("~");
        assert!(null.scalar_text().is_none());
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(YamlValue::String("x".into()).scalar_text().unwrap(), "x");
        assert_eq!(YamlValue::Boolean(false).scalar_text().unwrap(), "false");
        assert_eq!(
            YamlValue::Number(YamlNumber::Float(1.5)).scalar_text().unwrap(),
            "1.5"
        );
        assert!(YamlValue::Array(vec![]).scalar_text().is_none());
    }

    #[test]
    fn test_object_keeps_order() {
        let node = YamlNode::object([("b", YamlNode::null()), ("a", YamlNode::null())]);
        if let YamlValue::Object(map) = node.value() {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            assert_eq!(keys, vec!["b", "a"]);
        } else {
            panic!("Expected object");
        }
    }

    #[test]
    fn test_value_kinds() {
        assert!(YamlValue::Boolean(true).is_scalar());
        assert!(!YamlValue::Null.is_scalar());
        assert!(!YamlValue::MultiDoc(vec![]).is_scalar());
        assert!(YamlNode::object([("k", YamlNode::null())]).value().is_object());
    }
}
