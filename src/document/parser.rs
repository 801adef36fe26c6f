//! YAML parsing.
//!
//! Documents are read from yaml-rust2's event parser and built into
//! `YamlTree` structures. Scalars keep the text they were written with, so
//! `id: 007` is the integer 7 whose scalar text is still `007`. Aliases are
//! resolved while loading, so an aliased node appears in full at every place
//! it is referenced.
//!
//! # Example
//!
//! ```
//! use yamlselect::document::parser::parse_yaml;
//! use yamlselect::document::node::YamlValue;
//!
//! let tree = parse_yaml("name: Alice\nage: 30").unwrap();
//! assert!(tree.root().value().is_object());
//! ```

use super::node::{YamlNode, YamlNumber, YamlValue};
use super::tree::YamlTree;
use anyhow::{anyhow, bail, Context, Result};
use indexmap::IndexMap;
use std::collections::HashMap;
use yaml_rust2::parser::{MarkedEventReceiver, Parser, Tag};
use yaml_rust2::scanner::{Marker, TScalarStyle};
use yaml_rust2::{Event, Yaml};

/// Parses a YAML string into a `YamlTree`.
///
/// A stream with several documents becomes a `MultiDoc` root holding one
/// node per document. An empty stream yields a `Null` root.
///
/// # Errors
///
/// Returns an error if the input is not valid YAML, uses a mapping key that
/// is not a scalar, or repeats a key within one mapping.
pub fn parse_yaml(yaml_str: &str) -> Result<YamlTree> {
    let mut builder = TreeBuilder::default();
    Parser::new_from_str(yaml_str)
        .load(&mut builder, true)
        .context("Failed to parse YAML")?;
    if let Some(err) = builder.error {
        return Err(err).context("Failed to parse YAML");
    }

    let mut docs = builder.docs;
    log::debug!("loaded {} YAML document(s)", docs.len());

    let root = match docs.len() {
        0 => YamlNode::null(),
        1 => docs.remove(0),
        _ => YamlNode::new(YamlValue::MultiDoc(docs)),
    };

    Ok(YamlTree::with_source(root, Some(yaml_str.to_string())))
}

/// A container being filled while its events arrive.
enum Frame {
    Sequence {
        elements: Vec<YamlNode>,
        anchor: usize,
    },
    Mapping {
        entries: IndexMap<String, YamlNode>,
        key: Option<String>,
        anchor: usize,
    },
}

/// Builds `YamlNode` documents from parser events.
#[derive(Default)]
struct TreeBuilder {
    docs: Vec<YamlNode>,
    stack: Vec<Frame>,
    current: Option<YamlNode>,
    anchors: HashMap<usize, YamlNode>,
    error: Option<anyhow::Error>,
}

impl MarkedEventReceiver for TreeBuilder {
    fn on_event(&mut self, ev: Event, mark: Marker) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.handle(ev) {
            self.error = Some(err.context(format!(
                "at line {} column {}",
                mark.line(),
                mark.col() + 1
            )));
        }
    }
}

impl TreeBuilder {
    fn handle(&mut self, ev: Event) -> Result<()> {
        match ev {
            Event::Nothing | Event::StreamStart | Event::StreamEnd | Event::DocumentStart => {}
            Event::DocumentEnd => {
                let doc = self.current.take().unwrap_or_else(YamlNode::null);
                self.docs.push(doc);
            }
            Event::SequenceStart(anchor, _) => self.stack.push(Frame::Sequence {
                elements: Vec::new(),
                anchor,
            }),
            Event::MappingStart(anchor, _) => self.stack.push(Frame::Mapping {
                entries: IndexMap::new(),
                key: None,
                anchor,
            }),
            Event::SequenceEnd | Event::MappingEnd => {
                let (node, anchor) = match self.stack.pop() {
                    Some(Frame::Sequence { elements, anchor }) => {
                        (YamlNode::new(YamlValue::Array(elements)), anchor)
                    }
                    Some(Frame::Mapping {
                        entries,
                        key: None,
                        anchor,
                    }) => (YamlNode::new(YamlValue::Object(entries)), anchor),
                    Some(Frame::Mapping { key: Some(key), .. }) => {
                        bail!("Mapping ended without a value for key '{}'", key)
                    }
                    None => bail!("Unbalanced end of collection"),
                };
                self.insert(node, anchor)?;
            }
            Event::Scalar(text, style, anchor, tag) => {
                let node = scalar_node(text, style, tag.as_ref());
                self.insert(node, anchor)?;
            }
            Event::Alias(id) => {
                let node = self
                    .anchors
                    .get(&id)
                    .cloned()
                    .ok_or_else(|| anyhow!("Unknown alias"))?;
                self.insert(node, 0)?;
            }
        }
        Ok(())
    }

    /// Places a finished node into its parent, or makes it the document.
    fn insert(&mut self, node: YamlNode, anchor: usize) -> Result<()> {
        // anchor ids start at 1
        if anchor > 0 {
            self.anchors.insert(anchor, node.clone());
        }

        match self.stack.last_mut() {
            None => self.current = Some(node),
            Some(Frame::Sequence { elements, .. }) => elements.push(node),
            Some(Frame::Mapping { entries, key, .. }) => match key.take() {
                None => *key = Some(key_text(&node)?),
                Some(name) => {
                    if entries.contains_key(&name) {
                        bail!("Duplicated key '{}' in mapping", name);
                    }
                    entries.insert(name, node);
                }
            },
        }
        Ok(())
    }
}

/// Converts a scalar event into a node that keeps its source text.
fn scalar_node(text: String, style: TScalarStyle, tag: Option<&Tag>) -> YamlNode {
    let explicit_string = tag
        .map(|tag| tag.handle == "tag:yaml.org,2002:" && tag.suffix == "str")
        .unwrap_or(false);

    let value = if style != TScalarStyle::Plain || explicit_string {
        YamlValue::String(text.clone())
    } else {
        match Yaml::from_str(&text) {
            Yaml::Integer(i) => YamlValue::Number(YamlNumber::Integer(i)),
            real @ Yaml::Real(_) => match real.as_f64() {
                Some(f) => YamlValue::Number(YamlNumber::Float(f)),
                None => YamlValue::String(text.clone()),
            },
            Yaml::Boolean(b) => YamlValue::Boolean(b),
            Yaml::Null => YamlValue::Null,
            _ => YamlValue::String(text.clone()),
        }
    };
    YamlNode::new(value).with_original_formatting(text)
}

/// Mapping keys are the scalar text as written.
fn key_text(node: &YamlNode) -> Result<String> {
    match (node.value(), node.original_formatting()) {
        (YamlValue::String(s), None) => Ok(s.clone()),
        (YamlValue::Object(_) | YamlValue::Array(_) | YamlValue::MultiDoc(_), _) => {
            bail!("Unsupported mapping key: only scalar keys are allowed")
        }
        (_, Some(text)) => Ok(text.to_string()),
        (_, None) => bail!("Unsupported mapping key: only scalar keys are allowed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_object() {
        let tree = parse_yaml("name: test\ncount: 42").unwrap();
        if let YamlValue::Object(obj) = tree.root().value() {
            assert_eq!(obj.len(), 2);
            assert_eq!(obj["name"].value(), &YamlValue::String("test".into()));
            assert_eq!(
                obj["count"].value(),
                &YamlValue::Number(YamlNumber::Integer(42))
            );
        } else {
            panic!("Expected object");
        }
    }

    #[test]
    fn test_parse_keeps_key_order() {
        let tree = parse_yaml("zeta: 1\nalpha: 2\nmid: 3").unwrap();
        if let YamlValue::Object(obj) = tree.root().value() {
            let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
            assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        } else {
            panic!("Expected object");
        }
    }

    #[test]
    fn test_parse_scalars() {
        let tree = parse_yaml("- 1.5\n- true\n- ~\n- text\n- '12'").unwrap();
        if let YamlValue::Array(items) = tree.root().value() {
            assert_eq!(items[0].value(), &YamlValue::Number(YamlNumber::Float(1.5)));
            assert_eq!(items[1].value(), &YamlValue::Boolean(true));
            assert_eq!(items[2].value(), &YamlValue::Null);
            assert_eq!(items[3].value(), &YamlValue::String("text".into()));
            assert_eq!(items[4].value(), &YamlValue::String("12".into()));
        } else {
            panic!("Expected array");
        }
    }

    #[test]
    fn test_parse_keeps_scalar_literals() {
        let tree = parse_yaml("[007, 1.50, True, 0x10, !!str 5]").unwrap();
        if let YamlValue::Array(items) = tree.root().value() {
            let texts: Vec<String> = items
                .iter()
                .map(|item| item.scalar_text().unwrap().into_owned())
                .collect();
            assert_eq!(texts, vec!["007", "1.50", "True", "0x10", "5"]);
            assert_eq!(items[0].value(), &YamlValue::Number(YamlNumber::Integer(7)));
            assert_eq!(items[3].value(), &YamlValue::Number(YamlNumber::Integer(16)));
            assert_eq!(items[4].value(), &YamlValue::String("5".into()));
        } else {
            panic!("Expected array");
        }
    }

    #[test]
    fn test_parse_resolves_aliases() {
        let yaml = "defaults: &config\n  timeout: 30\nservice: *config\n";
        let tree = parse_yaml(yaml).unwrap();
        if let YamlValue::Object(obj) = tree.root().value() {
            assert_eq!(obj["defaults"], obj["service"]);
        } else {
            panic!("Expected object");
        }
    }

    #[test]
    fn test_parse_scalar_keys_keep_their_text() {
        let tree = parse_yaml("1: one\ntrue: yes\n1.50: price").unwrap();
        if let YamlValue::Object(obj) = tree.root().value() {
            assert!(obj.contains_key("1"));
            assert!(obj.contains_key("true"));
            assert!(obj.contains_key("1.50"));
        } else {
            panic!("Expected object");
        }
    }

    #[test]
    fn test_parse_multi_document() {
        let tree = parse_yaml("---\na: 1\n---\nb: 2\n").unwrap();
        if let YamlValue::MultiDoc(docs) = tree.root().value() {
            assert_eq!(docs.len(), 2);
            assert!(docs[1].value().is_object());
        } else {
            panic!("Expected multi-document root");
        }
    }

    #[test]
    fn test_parse_empty_input() {
        let tree = parse_yaml("").unwrap();
        assert_eq!(tree.root().value(), &YamlValue::Null);
        assert_eq!(tree.original_source(), Some(""));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        assert!(parse_yaml("key: [unclosed").is_err());
    }

    #[test]
    fn test_parse_rejects_complex_keys() {
        let err = parse_yaml("? [a, b]\n: value\n").unwrap_err();
        assert!(format!("{:#}", err).contains("scalar keys"));
    }

    #[test]
    fn test_parse_rejects_duplicate_keys() {
        let err = parse_yaml("a: 1\na: 2\n").unwrap_err();
        assert!(format!("{:#}", err).contains("Duplicated key 'a'"));
    }
}
