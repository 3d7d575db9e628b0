//! Schema Export Tests
//!
//! - Warehouse columns carry exactly name, type and mode
//! - Search mappings expose type and index mode
//! - Field names always come from the key formatter

use leafschema::leaf::{Analyzer, IndexMode};
use leafschema::{FlatMode, Keyable, Leaf, LeafKind, PassthroughKeys, WarehouseMode};
use serde_json::json;

// =============================================================================
// Helper Functions
// =============================================================================

/// Backend naming the way a columnar store wants it.
struct BackendKeys;

impl Keyable for BackendKeys {
    fn key_to_search(&self, name: &str) -> String {
        format!("es_{}", name)
    }

    fn key_to_warehouse(&self, name: &str) -> String {
        name.replace('.', "__")
    }

    fn key_to_display(&self, name: &str) -> String {
        format!("<{}>", name)
    }
}

// =============================================================================
// Warehouse Tests
// =============================================================================

#[test]
fn test_required_integer_column() {
    let leaf = Leaf::new(LeafKind::Integer).required();
    let column = leaf.to_warehouse_schema(&PassthroughKeys, "age");
    assert_eq!(
        serde_json::to_value(&column).unwrap(),
        json!({"name": "age", "type": "INTEGER", "mode": "REQUIRED"})
    );
}

#[test]
fn test_optional_integer_column() {
    let leaf = Leaf::new(LeafKind::Integer);
    let column = leaf.to_warehouse_schema(&PassthroughKeys, "age");
    assert_eq!(
        serde_json::to_value(&column).unwrap(),
        json!({"name": "age", "type": "INTEGER", "mode": "NULLABLE"})
    );
}

#[test]
fn test_warehouse_types_per_kind() {
    let expected = [
        (LeafKind::AnalyzedString, "STRING"),
        (LeafKind::String, "STRING"),
        (LeafKind::IPv4Address, "STRING"),
        (LeafKind::Integer, "INTEGER"),
        (LeafKind::Byte, "INTEGER"),
        (LeafKind::Short, "INTEGER"),
        (LeafKind::Long, "DOUBLE"),
        (LeafKind::Float, "DOUBLE"),
        (LeafKind::Double, "DOUBLE"),
        (LeafKind::Boolean, "BOOLEAN"),
        (LeafKind::Binary, "STRING"),
        (LeafKind::IndexedBinary, "STRING"),
        (LeafKind::DateTime, "TIMESTAMP"),
    ];
    for (kind, warehouse_type) in expected {
        let column = Leaf::new(kind).to_warehouse_schema(&PassthroughKeys, "f");
        assert_eq!(column.field_type, warehouse_type, "{}", kind);
        assert_eq!(column.mode, WarehouseMode::Nullable);
    }
}

#[test]
fn test_warehouse_name_uses_formatter() {
    let column = Leaf::new(LeafKind::String).to_warehouse_schema(&BackendKeys, "http.title");
    assert_eq!(column.name, "http__title");
}

// =============================================================================
// Search Tests
// =============================================================================

#[test]
fn test_search_types_per_kind() {
    let expected = [
        (LeafKind::AnalyzedString, "string", "analyzed"),
        (LeafKind::String, "string", "not_analyzed"),
        (LeafKind::IPv4Address, "ip", "analyzed"),
        (LeafKind::Integer, "integer", "analyzed"),
        (LeafKind::Byte, "byte", "analyzed"),
        (LeafKind::Short, "short", "analyzed"),
        (LeafKind::Long, "long", "analyzed"),
        (LeafKind::Float, "float", "analyzed"),
        (LeafKind::Double, "double", "analyzed"),
        (LeafKind::Boolean, "boolean", "analyzed"),
        (LeafKind::Binary, "binary", "no"),
        (LeafKind::IndexedBinary, "binary", "not_analyzed"),
        (LeafKind::DateTime, "datetime", "analyzed"),
    ];
    for (kind, search_type, index) in expected {
        let mapping = Leaf::new(kind).to_search_schema(&PassthroughKeys, "f").to_json();
        assert_eq!(mapping, json!({"type": search_type, "index": index}), "{}", kind);
    }
}

#[test]
fn test_search_name_and_options() {
    let leaf = Leaf::new(LeafKind::AnalyzedString)
        .with_index(IndexMode::NotAnalyzed)
        .with_analyzer(Analyzer::Standard);
    let field = leaf.to_search_schema(&BackendKeys, "banner");
    assert_eq!(field.name, "es_banner");
    assert_eq!(
        field.to_named_json(),
        json!({"es_banner": {"type": "string", "index": "not_analyzed", "analyzer": "standard"}})
    );
}

// =============================================================================
// Display and Listing Tests
// =============================================================================

#[test]
fn test_display_strings() {
    assert_eq!(
        Leaf::new(LeafKind::IndexedBinary).to_display_string(&PassthroughKeys, "fp"),
        "fp: indexedbinary"
    );
    assert_eq!(
        Leaf::new(LeafKind::DateTime).to_display_string(&BackendKeys, "ts"),
        "<ts>: datetime"
    );
}

#[test]
fn test_flat_listing() {
    let rows = Leaf::new(LeafKind::AnalyzedString)
        .required()
        .with_raw()
        .to_flat("p80.http", "title", false);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].name, "p80.http.title.raw");
    assert_eq!(rows[1].mode, FlatMode::Required);
}

// =============================================================================
// Definition Round Trip Tests
// =============================================================================

#[test]
fn test_definition_from_json_exports() {
    let leaf = Leaf::from_json_value(&json!({
        "type": "long",
        "required": true,
        "doc": "bytes sent"
    }))
    .unwrap();
    let column = leaf.to_warehouse_schema(&PassthroughKeys, "bytes");
    assert_eq!(
        serde_json::to_value(&column).unwrap(),
        json!({"name": "bytes", "type": "DOUBLE", "mode": "REQUIRED", "description": "bytes sent"})
    );
    assert_eq!(leaf.to_definition().bit_width, Some(64));
}

#[test]
fn test_leaf_serializes_back_to_definition() {
    let leaf = Leaf::new(LeafKind::Binary).with_index(IndexMode::NotAnalyzed);
    let text = serde_json::to_string(&leaf).unwrap();
    assert_eq!(Leaf::from_json_str(&text).unwrap(), leaf);
}

/// An exported definition loads back into an equivalent leaf, for every kind.
#[test]
fn test_exported_definition_loads_back() {
    for kind in LeafKind::ALL {
        let leaf = Leaf::new(kind)
            .required()
            .with_doc("d")
            .with_analyzer(Analyzer::Simple);
        let text = serde_json::to_string(&leaf.to_definition()).unwrap();
        let back = Leaf::from_json_str(&text).unwrap_or_else(|e| panic!("{}: {}", kind, e));
        assert_eq!(back.kind(), kind);
        assert!(back.is_required());
        assert_eq!(back.doc(), Some("d"));
        assert_eq!(back.index_mode(), leaf.index_mode());
        assert_eq!(back.to_definition(), leaf.to_definition());
    }

    let leaf = Leaf::new(LeafKind::Byte).required().with_doc("d");
    let text = serde_json::to_string(&leaf.to_definition()).unwrap();
    assert_eq!(Leaf::from_json_str(&text).unwrap(), leaf);
}
