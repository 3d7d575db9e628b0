//! Flattened field listings for documentation tooling

use serde::Serialize;

use crate::leaf::Leaf;

/// How often a flattened field occurs in a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlatMode {
    Repeated,
    Required,
    Nullable,
}

/// One row of a flattened schema listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlatField {
    /// Dotted path from the record root
    pub name: String,
    #[serde(rename = "type")]
    pub kind_name: &'static str,
    pub search_type: &'static str,
    pub documentation: Option<String>,
    pub mode: FlatMode,
}

impl Leaf {
    /// Lists this leaf under `parent.name`, plus `parent.name.raw` when
    /// the leaf carries a raw subfield.
    pub fn to_flat(&self, parent: &str, name: &str, repeated: bool) -> Vec<FlatField> {
        let mode = if repeated {
            FlatMode::Repeated
        } else if self.is_required() {
            FlatMode::Required
        } else {
            FlatMode::Nullable
        };
        let full_name = if parent.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", parent, name)
        };
        let row = |name: String| FlatField {
            name,
            kind_name: self.kind().name(),
            search_type: self.spec().search_type,
            documentation: self.doc().map(str::to_string),
            mode,
        };

        let mut rows = vec![row(full_name.clone())];
        if self.include_raw() {
            rows.push(row(format!("{}.raw", full_name)));
        }
        rows
    }
}
