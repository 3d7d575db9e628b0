//! Search-index field mapping

use serde::Serialize;
use serde_json::{json, Map, Value as Json};

use super::keys::Keyable;
use crate::leaf::{Analyzer, IndexMode, Leaf};

/// Exact-match copy of a text field, indexed under `<name>.raw`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawSubfield {
    #[serde(rename = "type")]
    pub field_type: &'static str,
    pub index: IndexMode,
}

/// Mapping of one leaf in the search index.
///
/// Serializes to the mapping body; `name` is the key it is registered under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchField {
    #[serde(skip)]
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: &'static str,
    pub index: IndexMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyzer: Option<Analyzer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<RawSubfield>,
}

impl SearchField {
    /// The mapping body as JSON, `raw` nested under `fields`.
    pub fn to_json(&self) -> Json {
        let mut body = Map::new();
        body.insert("type".into(), json!(self.field_type));
        body.insert("index".into(), json!(self.index.as_str()));
        if let Some(analyzer) = self.analyzer {
            body.insert("analyzer".into(), json!(analyzer.as_str()));
        }
        if let Some(raw) = &self.raw {
            body.insert(
                "fields".into(),
                json!({"raw": {"type": raw.field_type, "index": raw.index.as_str()}}),
            );
        }
        Json::Object(body)
    }

    /// `{ <name>: <body> }`
    pub fn to_named_json(&self) -> Json {
        let mut named = Map::new();
        named.insert(self.name.clone(), self.to_json());
        Json::Object(named)
    }
}

impl Leaf {
    /// Builds the search-index mapping for the field `name`.
    pub fn to_search_schema<K: Keyable + ?Sized>(&self, keys: &K, name: &str) -> SearchField {
        let field_type = self.spec().search_type;
        SearchField {
            name: keys.key_to_search(name),
            field_type,
            index: self.index_mode(),
            analyzer: self.analyzer(),
            raw: self.include_raw().then_some(RawSubfield {
                field_type,
                index: IndexMode::NotAnalyzed,
            }),
        }
    }
}
