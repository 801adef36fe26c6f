use yamlselect::document::cursor::NodeRef;
use yamlselect::document::node::{YamlNode, YamlNumber, YamlValue};
use yamlselect::document::parser::parse_yaml;
use yamlselect::document::tree::YamlTree;
use yamlselect::yamlpath::{NodeKind, PathError, PathNode};

#[test]
fn test_parse_nested_document() {
    let yaml = r#"
server:
  host: localhost
  ports:
    - 80
    - 443
  ratio: 0.75
  debug: false
  owner: null
"#;
    let tree = parse_yaml(yaml).unwrap();
    let server = tree.select("server");
    assert_eq!(server.kind(), NodeKind::Map);
    assert_eq!(server.len(), 5);

    if let Some(YamlValue::Object(entries)) = server.value() {
        let keys: Vec<&str> = entries.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["host", "ports", "ratio", "debug", "owner"]);
        assert_eq!(
            entries["ratio"].value(),
            &YamlValue::Number(YamlNumber::Float(0.75))
        );
    } else {
        panic!("Expected object");
    }

    assert_eq!(tree.select("server.debug").scalar().unwrap(), "false");
    assert_eq!(tree.select("server.ports[1]").scalar().unwrap(), "443");
    assert_eq!(tree.cursor().get("server").unwrap().get("owner").unwrap().kind(), NodeKind::Null);
}

#[test]
fn test_original_source_is_kept() {
    let yaml = "a: 1\n";
    let tree = parse_yaml(yaml).unwrap();
    assert_eq!(tree.original_source(), Some(yaml));
}

#[test]
fn test_built_tree_without_source() {
    let tree = YamlTree::new(YamlNode::object([(
        "list",
        YamlNode::array([YamlNode::string("x"), YamlNode::null()]),
    )]));
    assert_eq!(tree.original_source(), None);
    assert_eq!(tree.select("list[0]").scalar().unwrap(), "x");
    assert!(tree.select("list[1]").is_null());
}

#[test]
fn test_cursor_shares_tree_nodes() {
    let tree = parse_yaml("a:\n  b: [1, 2]\n").unwrap();
    let first = tree.select("a.b");
    let second = tree.select("a.b");
    assert!(std::ptr::eq(first.node().unwrap(), second.node().unwrap()));
}

#[test]
fn test_collected_results_are_sequences() {
    let tree = parse_yaml("- {n: 1}\n- {n: 2}\n- {m: 3}\n").unwrap();
    let node = tree.select("n");
    match &node {
        NodeRef::Collected(items) => assert_eq!(items.len(), 2),
        other => panic!("Expected collected sequence, got {:?}", other),
    }
    assert_eq!(node.at(1).unwrap().scalar().unwrap(), "2");
}

#[test]
fn test_projection_keeps_null_values() {
    let tree = parse_yaml("- {n: ~}\n- {n: 2}\n").unwrap();
    let node = tree.select("n");
    assert_eq!(node.len(), 2);
    assert!(node.at(0).unwrap().is_null());
}

#[test]
fn test_resolve_error_from_tree() {
    let tree = parse_yaml("a: [1]\n").unwrap();
    let err = tree.resolve("a.b").unwrap_err();
    assert_eq!(err.kind(), PathError::NodeNotFound);
    assert_eq!(err.text(), ".b");
}

#[test]
fn test_invalid_yaml_is_an_error() {
    let err = parse_yaml("a: 'unterminated").unwrap_err();
    assert!(err.to_string().contains("Failed to parse YAML"));
}

#[test]
fn test_special_floats_render_as_yaml() {
    let tree = parse_yaml("[.inf, -.inf, .nan]").unwrap();
    assert_eq!(tree.select("[0]").scalar().unwrap(), ".inf");
    assert_eq!(tree.select("[1]").scalar().unwrap(), "-.inf");
    assert_eq!(tree.select("[2]").scalar().unwrap(), ".nan");
}
