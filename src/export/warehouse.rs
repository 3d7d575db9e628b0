//! Warehouse column schema

use std::fmt;

use serde::{Deserialize, Serialize};

use super::keys::Keyable;
use crate::leaf::Leaf;

/// Column nullability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WarehouseMode {
    Required,
    Nullable,
}

impl WarehouseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarehouseMode::Required => "REQUIRED",
            WarehouseMode::Nullable => "NULLABLE",
        }
    }
}

impl fmt::Display for WarehouseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One column of a warehouse table schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub mode: WarehouseMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Leaf {
    /// Builds the warehouse column for the field `name`.
    pub fn to_warehouse_schema<K: Keyable + ?Sized>(&self, keys: &K, name: &str) -> WarehouseField {
        let mode = if self.is_required() {
            WarehouseMode::Required
        } else {
            WarehouseMode::Nullable
        };
        WarehouseField {
            name: keys.key_to_warehouse(name),
            field_type: self.spec().warehouse_type.to_string(),
            mode,
            description: self.doc().map(str::to_string),
        }
    }
}
