//! Self-describing leaf definitions

use serde::Serialize;

use crate::leaf::{Analyzer, IndexMode, Leaf};

/// Everything known about a leaf, for schema documentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeafDefinition {
    #[serde(rename = "type")]
    pub kind_name: &'static str,
    pub required: bool,
    pub doc: Option<String>,
    pub search_type: &'static str,
    pub warehouse_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<IndexMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analyzer: Option<Analyzer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bit_width: Option<u32>,
}

impl Leaf {
    /// Describes this leaf. `index` is the effective mode only when it
    /// differs from the analyzed default.
    pub fn to_definition(&self) -> LeafDefinition {
        let spec = self.spec();
        let index = Some(self.index_mode()).filter(|mode| *mode != IndexMode::default());
        LeafDefinition {
            kind_name: self.kind().name(),
            required: self.is_required(),
            doc: self.doc().map(str::to_string),
            search_type: spec.search_type,
            warehouse_type: spec.warehouse_type,
            index,
            analyzer: self.analyzer(),
            bit_width: spec.bit_width,
        }
    }
}
