//! The closed set of leaf kinds and their constant descriptors
//!
//! Supported kinds:
//! - analyzedstring, string: text, full-text analyzed or exact match
//! - ipv4address: dotted quad
//! - integer, byte, short, long: signed integers bounded by bit width
//! - float, double: floating point
//! - boolean
//! - binary, indexedbinary: hex data, unindexed or exact match
//! - datetime: free-form timestamp text
//!
//! Narrower kinds are attribute overrides of a base kind (byte over
//! integer, double over float, indexedbinary over binary). They share
//! the rule implementations in [`super::rules`] instead of inheriting them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::LeafDefinitionError;
use super::value::{NativeClass, Value};

/// Search-index analysis mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexMode {
    /// Full-text analyzed
    #[default]
    Analyzed,
    /// Searchable, exact match only
    NotAnalyzed,
    /// Not searchable
    No,
}

impl IndexMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexMode::Analyzed => "analyzed",
            IndexMode::NotAnalyzed => "not_analyzed",
            IndexMode::No => "no",
        }
    }
}

impl fmt::Display for IndexMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search-index text analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Analyzer {
    /// Unicode word boundaries, most punctuation removed
    Standard,
    /// Splits on non-letters and lowercases
    Simple,
    /// Splits on whitespace, keeps case
    Whitespace,
}

impl Analyzer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Analyzer::Standard => "standard",
            Analyzer::Simple => "simple",
            Analyzer::Whitespace => "whitespace",
        }
    }
}

/// Kind-specific check applied after the class check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    None,
    /// Dotted-quad prefix pattern
    Ipv4,
    /// Signed range `-2^n + 1 ..= 2^n - 1`
    BitWidth(u32),
    /// Leading run of hex characters
    HexPrefix,
    /// Free-form timestamp text
    Timestamp,
}

/// Constant descriptor of a leaf kind
#[derive(Debug)]
pub struct LeafSpec {
    pub kind: LeafKind,
    /// Search-index field type tag
    pub search_type: &'static str,
    pub index_mode: IndexMode,
    /// Warehouse column type tag
    pub warehouse_type: &'static str,
    /// Value classes admitted before the rule runs
    pub accepted: &'static [NativeClass],
    pub bit_width: Option<u32>,
    pub rule: Rule,
}

impl LeafSpec {
    pub fn accepts(&self, class: NativeClass) -> bool {
        self.accepted.contains(&class)
    }

    /// Accepted classes rendered as `[str, int]`
    pub fn accepted_names(&self) -> String {
        let names: Vec<&str> = self.accepted.iter().map(NativeClass::name).collect();
        format!("[{}]", names.join(", "))
    }
}

const STR: &[NativeClass] = &[NativeClass::Str];
const INT: &[NativeClass] = &[NativeClass::Int];
const FLOAT: &[NativeClass] = &[NativeClass::Float];
const BOOL: &[NativeClass] = &[NativeClass::Bool];
const STR_OR_INT: &[NativeClass] = &[NativeClass::Str, NativeClass::Int];

const fn integer(kind: LeafKind, search_type: &'static str, warehouse_type: &'static str, bits: u32) -> LeafSpec {
    LeafSpec {
        kind,
        search_type,
        index_mode: IndexMode::Analyzed,
        warehouse_type,
        accepted: INT,
        bit_width: Some(bits),
        rule: Rule::BitWidth(bits),
    }
}

const fn plain(
    kind: LeafKind,
    search_type: &'static str,
    index_mode: IndexMode,
    warehouse_type: &'static str,
    accepted: &'static [NativeClass],
    rule: Rule,
) -> LeafSpec {
    LeafSpec {
        kind,
        search_type,
        index_mode,
        warehouse_type,
        accepted,
        bit_width: None,
        rule,
    }
}

/// Every leaf descriptor, in [`LeafKind::ALL`] order.
pub static CATALOG: [LeafSpec; 13] = [
    plain(LeafKind::AnalyzedString, "string", IndexMode::Analyzed, "STRING", STR, Rule::None),
    plain(LeafKind::String, "string", IndexMode::NotAnalyzed, "STRING", STR, Rule::None),
    plain(LeafKind::IPv4Address, "ip", IndexMode::Analyzed, "STRING", STR, Rule::Ipv4),
    integer(LeafKind::Integer, "integer", "INTEGER", 32),
    integer(LeafKind::Byte, "byte", "INTEGER", 8),
    integer(LeafKind::Short, "short", "INTEGER", 16),
    integer(LeafKind::Long, "long", "DOUBLE", 64),
    plain(LeafKind::Float, "float", IndexMode::Analyzed, "DOUBLE", FLOAT, Rule::None),
    plain(LeafKind::Double, "double", IndexMode::Analyzed, "DOUBLE", FLOAT, Rule::None),
    plain(LeafKind::Boolean, "boolean", IndexMode::Analyzed, "BOOLEAN", BOOL, Rule::None),
    plain(LeafKind::Binary, "binary", IndexMode::No, "STRING", STR, Rule::HexPrefix),
    plain(LeafKind::IndexedBinary, "binary", IndexMode::NotAnalyzed, "STRING", STR, Rule::HexPrefix),
    plain(LeafKind::DateTime, "datetime", IndexMode::Analyzed, "TIMESTAMP", STR_OR_INT, Rule::Timestamp),
];

/// Leaf kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeafKind {
    AnalyzedString,
    String,
    IPv4Address,
    Integer,
    Byte,
    Short,
    Long,
    Float,
    Double,
    Boolean,
    Binary,
    IndexedBinary,
    DateTime,
}

impl LeafKind {
    pub const ALL: [LeafKind; 13] = [
        LeafKind::AnalyzedString,
        LeafKind::String,
        LeafKind::IPv4Address,
        LeafKind::Integer,
        LeafKind::Byte,
        LeafKind::Short,
        LeafKind::Long,
        LeafKind::Float,
        LeafKind::Double,
        LeafKind::Boolean,
        LeafKind::Binary,
        LeafKind::IndexedBinary,
        LeafKind::DateTime,
    ];

    /// Returns the constant descriptor for this kind
    pub fn spec(self) -> &'static LeafSpec {
        let idx = match self {
            LeafKind::AnalyzedString => 0,
            LeafKind::String => 1,
            LeafKind::IPv4Address => 2,
            LeafKind::Integer => 3,
            LeafKind::Byte => 4,
            LeafKind::Short => 5,
            LeafKind::Long => 6,
            LeafKind::Float => 7,
            LeafKind::Double => 8,
            LeafKind::Boolean => 9,
            LeafKind::Binary => 10,
            LeafKind::IndexedBinary => 11,
            LeafKind::DateTime => 12,
        };
        &CATALOG[idx]
    }

    /// Kind name as written in schema definitions
    pub fn name(self) -> &'static str {
        match self {
            LeafKind::AnalyzedString => "AnalyzedString",
            LeafKind::String => "String",
            LeafKind::IPv4Address => "IPv4Address",
            LeafKind::Integer => "Integer",
            LeafKind::Byte => "Byte",
            LeafKind::Short => "Short",
            LeafKind::Long => "Long",
            LeafKind::Float => "Float",
            LeafKind::Double => "Double",
            LeafKind::Boolean => "Boolean",
            LeafKind::Binary => "Binary",
            LeafKind::IndexedBinary => "IndexedBinary",
            LeafKind::DateTime => "DateTime",
        }
    }

    pub fn search_type(self) -> &'static str {
        self.spec().search_type
    }

    pub fn index_mode(self) -> IndexMode {
        self.spec().index_mode
    }

    pub fn warehouse_type(self) -> &'static str {
        self.spec().warehouse_type
    }

    pub fn bit_width(self) -> Option<u32> {
        self.spec().bit_width
    }

    /// A value this kind always accepts
    pub fn valid_example(self) -> Value {
        match self {
            LeafKind::AnalyzedString | LeafKind::String => Value::from("asdf"),
            LeafKind::IPv4Address => Value::from("141.212.120.0"),
            LeafKind::Integer => Value::from(234_234_252),
            LeafKind::Byte => Value::from(34),
            LeafKind::Short => Value::from(0xFFFF),
            LeafKind::Long => Value::from(10),
            LeafKind::Float | LeafKind::Double => Value::from(10.0),
            LeafKind::Boolean => Value::from(true),
            LeafKind::Binary | LeafKind::IndexedBinary => Value::from("03F87824"),
            LeafKind::DateTime => Value::from("Wed Jul  8 08:52:01 EDT 2015"),
        }
    }

    /// A value this kind always rejects
    pub fn invalid_example(self) -> Value {
        match self {
            LeafKind::AnalyzedString | LeafKind::String => Value::from(23),
            LeafKind::IPv4Address => Value::from("my string"),
            LeafKind::Integer => Value::from(8_589_934_592i64),
            LeafKind::Byte => Value::from((1 << 8) + 5),
            LeafKind::Short => Value::from(1 << 16),
            LeafKind::Long => Value::Int(1i128 << 68),
            LeafKind::Float | LeafKind::Double => Value::from("I'm a string!"),
            LeafKind::Boolean => Value::from(0),
            LeafKind::Binary | LeafKind::IndexedBinary => Value::from("normal"),
            LeafKind::DateTime => Value::from("Wed DNE  35 08:52:01 EDT 2015"),
        }
    }
}

impl fmt::Display for LeafKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LeafKind {
    type Err = LeafDefinitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeafKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| LeafDefinitionError::UnknownKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_matches_kinds() {
        for (idx, kind) in LeafKind::ALL.iter().enumerate() {
            assert_eq!(CATALOG[idx].kind, *kind);
            assert_eq!(kind.spec().kind, *kind);
            assert!(!kind.spec().accepted.is_empty());
        }
    }

    #[test]
    fn test_integer_family_widths() {
        assert_eq!(LeafKind::Integer.bit_width(), Some(32));
        assert_eq!(LeafKind::Byte.bit_width(), Some(8));
        assert_eq!(LeafKind::Short.bit_width(), Some(16));
        assert_eq!(LeafKind::Long.bit_width(), Some(64));
        assert_eq!(LeafKind::Float.bit_width(), None);
    }

    #[test]
    fn test_index_modes() {
        assert_eq!(LeafKind::AnalyzedString.index_mode(), IndexMode::Analyzed);
        assert_eq!(LeafKind::String.index_mode(), IndexMode::NotAnalyzed);
        assert_eq!(LeafKind::Binary.index_mode(), IndexMode::No);
        assert_eq!(LeafKind::IndexedBinary.index_mode(), IndexMode::NotAnalyzed);
        assert_eq!(LeafKind::Integer.index_mode(), IndexMode::default());
    }

    #[test]
    fn test_warehouse_types() {
        assert_eq!(LeafKind::Integer.warehouse_type(), "INTEGER");
        assert_eq!(LeafKind::Long.warehouse_type(), "DOUBLE");
        assert_eq!(LeafKind::DateTime.warehouse_type(), "TIMESTAMP");
        assert_eq!(LeafKind::Boolean.warehouse_type(), "BOOLEAN");
    }

    #[test]
    fn test_accepted_names() {
        assert_eq!(LeafKind::DateTime.spec().accepted_names(), "[str, int]");
        assert_eq!(LeafKind::Float.spec().accepted_names(), "[float]");
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("ipv4address".parse::<LeafKind>().unwrap(), LeafKind::IPv4Address);
        assert_eq!("DateTime".parse::<LeafKind>().unwrap(), LeafKind::DateTime);
        assert!(matches!(
            "uuid".parse::<LeafKind>(),
            Err(LeafDefinitionError::UnknownKind(_))
        ));
    }

    #[test]
    fn test_serde_names_are_lowercase() {
        let json = serde_json::to_string(&LeafKind::IndexedBinary).unwrap();
        assert_eq!(json, "\"indexedbinary\"");
        let json = serde_json::to_string(&IndexMode::NotAnalyzed).unwrap();
        assert_eq!(json, "\"not_analyzed\"");
    }
}
