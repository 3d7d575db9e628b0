//! Schema exporters
//!
//! Turns a [`Leaf`](crate::leaf::Leaf) and a field name into the
//! fragments external systems register:
//!
//! - search-index mapping (`to_search_schema`)
//! - warehouse column (`to_warehouse_schema`)
//! - display string (`to_display_string`, `write_indented`)
//! - flattened listing (`to_flat`) and definition (`to_definition`)
//!
//! Field names always go through a [`Keyable`].

mod definition;
mod display;
mod flat;
mod keys;
mod search;
mod warehouse;

pub use definition::LeafDefinition;
pub use flat::{FlatField, FlatMode};
pub use keys::{Keyable, PassthroughKeys};
pub use search::{RawSubfield, SearchField};
pub use warehouse::{WarehouseField, WarehouseMode};
