//! Leaf instances: a kind bound to per-field options
//!
//! Definitions can be built in code or loaded from JSON:
//!
//! ```json
//! {"type": "ipv4address", "required": true, "doc": "source address"}
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::errors::{DataValidationError, LeafDefinitionError, ValidationResult};
use super::kind::{Analyzer, IndexMode, LeafKind, LeafSpec, Rule};
use super::rules;
use super::value::Value;

fn is_false(b: &bool) -> bool {
    !*b
}

/// A leaf field definition. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LeafDef")]
pub struct Leaf {
    #[serde(rename = "type")]
    kind: LeafKind,
    required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    index: Option<IndexMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    analyzer: Option<Analyzer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    doc: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    include_raw: bool,
    #[serde(skip_serializing_if = "is_false")]
    deprecated: bool,
}

/// Wire form of a leaf definition; the kind is resolved by name.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LeafDef {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    index: Option<IndexMode>,
    #[serde(default)]
    analyzer: Option<Analyzer>,
    #[serde(default)]
    doc: Option<String>,
    #[serde(default)]
    include_raw: bool,
    #[serde(default)]
    deprecated: bool,
    // Derived from the kind; present in exported definitions.
    #[serde(default)]
    search_type: Option<String>,
    #[serde(default)]
    warehouse_type: Option<String>,
    #[serde(default)]
    bit_width: Option<u32>,
}

impl LeafDef {
    /// Derived keys, when given, must agree with the kind's catalog entry.
    fn check_derived(&self, spec: &LeafSpec) -> Result<(), LeafDefinitionError> {
        if let Some(given) = &self.search_type {
            if given != spec.search_type {
                return Err(derived_mismatch(spec, "search_type", given, spec.search_type));
            }
        }
        if let Some(given) = &self.warehouse_type {
            if given != spec.warehouse_type {
                return Err(derived_mismatch(spec, "warehouse_type", given, spec.warehouse_type));
            }
        }
        if let Some(given) = self.bit_width {
            if Some(given) != spec.bit_width {
                let expected = spec.bit_width.map_or_else(|| "none".to_string(), |b| b.to_string());
                return Err(derived_mismatch(spec, "bit_width", given, expected));
            }
        }
        Ok(())
    }
}

fn derived_mismatch(
    spec: &LeafSpec,
    key: &str,
    given: impl fmt::Display,
    expected: impl fmt::Display,
) -> LeafDefinitionError {
    LeafDefinitionError::Malformed(format!(
        "{} is {} for {}, got {}",
        key,
        expected,
        spec.kind.name(),
        given
    ))
}

impl TryFrom<LeafDef> for Leaf {
    type Error = LeafDefinitionError;

    fn try_from(def: LeafDef) -> Result<Self, Self::Error> {
        let kind: LeafKind = def.kind.parse()?;
        def.check_derived(kind.spec())?;
        let mut leaf = Leaf::new(kind);
        leaf.required = def.required;
        leaf.index = def.index;
        leaf.analyzer = def.analyzer;
        leaf.doc = def.doc;
        leaf.include_raw = def.include_raw;
        Ok(if def.deprecated { leaf.deprecated() } else { leaf })
    }
}

impl Leaf {
    /// Optional leaf with the kind's defaults
    pub fn new(kind: LeafKind) -> Self {
        Self {
            kind,
            required: false,
            index: None,
            analyzer: None,
            doc: None,
            include_raw: false,
            deprecated: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Overrides the kind's search index mode
    pub fn with_index(mut self, index: IndexMode) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_analyzer(mut self, analyzer: Analyzer) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Adds an exact-match `raw` subfield to the search mapping
    pub fn with_raw(mut self) -> Self {
        self.include_raw = true;
        self
    }

    /// Marks the leaf deprecated and logs a warning.
    pub fn deprecated(mut self) -> Self {
        warn!(
            kind = %self.kind,
            "{} is deprecated and will be removed in a future release",
            self.kind
        );
        self.deprecated = true;
        self
    }

    /// Loads a definition from a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, LeafDefinitionError> {
        let def: LeafDef = serde_json::from_str(json)?;
        Leaf::try_from(def)
    }

    /// Loads a definition from an already-parsed JSON value.
    pub fn from_json_value(json: &serde_json::Value) -> Result<Self, LeafDefinitionError> {
        let def = LeafDef::deserialize(json)?;
        Leaf::try_from(def)
    }

    pub fn kind(&self) -> LeafKind {
        self.kind
    }

    pub fn spec(&self) -> &'static LeafSpec {
        self.kind.spec()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Index mode after applying any per-field override
    pub fn index_mode(&self) -> IndexMode {
        self.index.unwrap_or(self.spec().index_mode)
    }

    /// The per-field index override, if any
    pub fn index_override(&self) -> Option<IndexMode> {
        self.index
    }

    pub fn analyzer(&self) -> Option<Analyzer> {
        self.analyzer
    }

    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    pub fn include_raw(&self) -> bool {
        self.include_raw
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated
    }

    /// Validates `value` for the field `name`.
    ///
    /// The value must be of an accepted class and then satisfy the kind's
    /// rule. No kind accepts null, and `required` plays no part here.
    ///
    /// # Errors
    ///
    /// Returns `DataValidationError` describing the first failed check.
    pub fn validate(&self, name: &str, value: &Value) -> ValidationResult<()> {
        let result = self.check(name, value);
        if let Err(ref err) = result {
            debug!(field = name, kind = %self.kind, violation = %err.kind(), "{}", err);
        }
        result
    }

    /// Validates a JSON scalar. Arrays and objects are class mismatches.
    pub fn validate_json(&self, name: &str, json: &serde_json::Value) -> ValidationResult<()> {
        match Value::try_from_json(json) {
            Some(value) => self.validate(name, &value),
            None => {
                let actual = if json.is_array() { "array" } else { "object" };
                let err = DataValidationError::class_mismatch(
                    name,
                    &self.spec().accepted_names(),
                    json,
                    actual,
                );
                debug!(field = name, kind = %self.kind, violation = %err.kind(), "{}", err);
                Err(err)
            }
        }
    }

    fn check(&self, name: &str, value: &Value) -> ValidationResult<()> {
        let spec = self.spec();
        rules::check_class(spec, name, value)?;

        match (spec.rule, value) {
            (Rule::None, _) => Ok(()),
            (Rule::Ipv4, Value::Str(s)) => rules::check_ipv4(name, s),
            (Rule::BitWidth(bits), Value::Int(i)) => rules::check_bit_width(bits, name, *i),
            (Rule::HexPrefix, Value::Str(s)) => rules::check_hex_prefix(name, s),
            (Rule::Timestamp, _) => rules::check_timestamp(name, value),
            // other classes were rejected by the class check
            _ => Ok(()),
        }
    }
}

impl From<LeafKind> for Leaf {
    fn from(kind: LeafKind) -> Self {
        Leaf::new(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaf::errors::ViolationKind;
    use serde_json::json;

    #[test]
    fn test_canonical_examples() {
        for kind in LeafKind::ALL {
            let leaf = Leaf::new(kind);
            assert!(
                leaf.validate(kind.name(), &kind.valid_example()).is_ok(),
                "valid example rejected for {}",
                kind
            );
            assert!(
                leaf.validate(kind.name(), &kind.invalid_example()).is_err(),
                "invalid example accepted for {}",
                kind
            );
        }
    }

    #[test]
    fn test_null_is_a_class_mismatch() {
        for leaf in [Leaf::new(LeafKind::Integer), Leaf::new(LeafKind::Integer).required()] {
            let err = leaf.validate("age", &Value::Null).unwrap_err();
            assert_eq!(err.kind(), ViolationKind::ClassMismatch);
            assert_eq!(
                err.message(),
                "class mismatch for age: expected [int], null has class null"
            );
        }
    }

    #[test]
    fn test_class_check_runs_before_rule() {
        let leaf = Leaf::new(LeafKind::Byte);
        let err = leaf.validate("b", &Value::from(1.0)).unwrap_err();
        assert_eq!(err.kind(), ViolationKind::ClassMismatch);
    }

    #[test]
    fn test_index_override() {
        let leaf = Leaf::new(LeafKind::Binary);
        assert_eq!(leaf.index_mode(), IndexMode::No);
        let leaf = leaf.with_index(IndexMode::NotAnalyzed);
        assert_eq!(leaf.index_mode(), IndexMode::NotAnalyzed);
        assert_eq!(leaf.index_override(), Some(IndexMode::NotAnalyzed));
    }

    #[test]
    fn test_validate_json() {
        let leaf = Leaf::new(LeafKind::Short);
        assert!(leaf.validate_json("port", &json!(443)).is_ok());
        assert!(leaf.validate_json("port", &json!(70000)).is_err());
        let err = leaf.validate_json("port", &json!([1])).unwrap_err();
        assert!(err.message().contains("has class array"));
    }

    #[test]
    fn test_from_json_str() {
        let leaf = Leaf::from_json_str(
            r#"{"type": "IPv4Address", "required": true, "doc": "source", "index": "not_analyzed"}"#,
        )
        .unwrap();
        assert_eq!(leaf.kind(), LeafKind::IPv4Address);
        assert!(leaf.is_required());
        assert_eq!(leaf.doc(), Some("source"));
        assert_eq!(leaf.index_mode(), IndexMode::NotAnalyzed);
    }

    #[test]
    fn test_deprecated_flag() {
        assert!(!Leaf::new(LeafKind::Long).is_deprecated());
        let leaf = Leaf::from_json_value(&json!({"type": "long", "deprecated": true})).unwrap();
        assert!(leaf.is_deprecated());
        assert_eq!(leaf, Leaf::new(LeafKind::Long).deprecated());
    }

    #[test]
    fn test_from_json_unknown_kind() {
        let err = Leaf::from_json_str(r#"{"type": "uuid"}"#).unwrap_err();
        assert_eq!(err, LeafDefinitionError::UnknownKind("uuid".into()));
    }

    #[test]
    fn test_from_json_rejects_unknown_fields() {
        let err = Leaf::from_json_value(&json!({"type": "string", "nullable": true})).unwrap_err();
        assert!(matches!(err, LeafDefinitionError::Malformed(_)));
    }

    #[test]
    fn test_from_json_checks_derived_keys() {
        let leaf = Leaf::from_json_value(&json!({
            "type": "short",
            "search_type": "short",
            "warehouse_type": "INTEGER",
            "bit_width": 16
        }))
        .unwrap();
        assert_eq!(leaf, Leaf::new(LeafKind::Short));

        let err = Leaf::from_json_value(&json!({"type": "short", "bit_width": 8})).unwrap_err();
        assert_eq!(
            err,
            LeafDefinitionError::Malformed("bit_width is 16 for Short, got 8".into())
        );
        let err =
            Leaf::from_json_value(&json!({"type": "string", "bit_width": 8})).unwrap_err();
        assert!(matches!(err, LeafDefinitionError::Malformed(_)));
        let err = Leaf::from_json_value(&json!({"type": "long", "warehouse_type": "INTEGER"}))
            .unwrap_err();
        assert!(matches!(err, LeafDefinitionError::Malformed(_)));
    }

    #[test]
    fn test_serde_round_trip() {
        let leaf = Leaf::new(LeafKind::AnalyzedString)
            .required()
            .with_analyzer(Analyzer::Whitespace)
            .with_raw();
        let json = serde_json::to_value(&leaf).unwrap();
        assert_eq!(json["type"], "analyzedstring");
        assert_eq!(json["analyzer"], "whitespace");
        assert!(json.get("doc").is_none());
        let back: Leaf = serde_json::from_value(json).unwrap();
        assert_eq!(back, leaf);
    }
}
