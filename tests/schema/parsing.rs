//! Integration tests for JSON parsing of schema documents

use std::fs::File;

use entitygen_foundation::ErrorKind;
use entitygen_schema::{
    CollectionType, SchemaSource, Side, parse_schema, parse_source, parse_str,
};

use crate::fixtures;

// =============================================================================
// Well-formed Documents
// =============================================================================

#[test]
fn parse_fixture_with_relations() {
    let file = File::open(fixtures().join("shop/shop-entities.json")).unwrap();
    let schema = parse_schema(file).unwrap();

    assert_eq!(schema.entities.len(), 2);
    assert_eq!(schema.entities[0].name, "Order");
    assert_eq!(schema.entities[0].class_file.as_deref(), Some("com.acme.shop.Order"));
    assert!(schema.entities[0].attributes[0].flags.contains("id"));

    let relation = &schema.relations[0];
    let source = relation.source.as_ref().unwrap();
    let target = relation.target.as_ref().unwrap();
    assert_eq!(source.attribute_name, "items");
    assert_eq!(source.side, Some(Side::One));
    assert_eq!(target.side, Some(Side::Many));
    assert_eq!(target.collection_type, Some(CollectionType::List));
    assert_eq!(relation.join_column.as_deref(), Some("order_id"));
    assert_eq!(relation.join_table, None);
}

#[test]
fn root_extend_defaults_to_true() {
    let schema = parse_str(
        r#"{"entities": [{"name": "UserExtras", "root": {"name": "User"}}]}"#,
    )
    .unwrap();
    let root = schema.entities[0].root.as_ref().unwrap();
    assert_eq!(root.name, "User");
    assert!(root.extend);
}

#[test]
fn missing_and_null_arrays_are_empty() {
    let schema = parse_str(
        r#"{"entities": [{"name": "A", "deployment": "a", "classFile": "x.A", "attributes": null}]}"#,
    )
    .unwrap();
    assert!(schema.relations.is_empty());
    assert!(schema.entities[0].attributes.is_empty());
}

#[test]
fn attribute_defaults() {
    let schema = parse_str(
        r#"{"entities": [{"name": "A", "deployment": "a", "classFile": "x.A",
            "attributes": [{"name": "n", "type": "int"}]}]}"#,
    )
    .unwrap();
    let attribute = &schema.entities[0].attributes[0];
    assert_eq!(attribute.ty, "int");
    assert!(!attribute.reintroduce);
    assert!(attribute.flags.is_empty());
}

// =============================================================================
// Malformed Documents
// =============================================================================

#[test]
fn malformed_json_reports_position() {
    let file = File::open(fixtures().join("invalid/malformed-entities.json")).unwrap();
    let err = parse_schema(file).unwrap_err();
    let ErrorKind::Parse { line, column, .. } = err.kind else {
        panic!("expected a parse error, got {err}");
    };
    assert_eq!(line, 3);
    assert!(column > 0);
}

#[test]
fn unknown_side_value_is_parse_error() {
    let err = parse_str(
        r#"{"relations": [{"source": {"entity": "A", "attributeName": "b", "side": "SOME"}}]}"#,
    )
    .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Parse { .. }));
}

#[test]
fn parse_source_names_the_source() {
    let source = SchemaSource::from_bytes("broken-entities.json", b"{ nope".to_vec());
    let err = parse_source(source).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Parse { .. }));
    assert_eq!(
        err.context.unwrap().source.as_deref(),
        Some("broken-entities.json")
    );
}
