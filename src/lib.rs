//! leafschema - scalar leaf types for search and warehouse schemas
//!
//! A leaf validates incoming values and describes itself to a
//! search index and a columnar warehouse.
//!
//! ```
//! use leafschema::{Leaf, LeafKind, PassthroughKeys, Value};
//!
//! let age = Leaf::new(LeafKind::Integer).required();
//! assert!(age.validate("age", &Value::from(42)).is_ok());
//!
//! let column = age.to_warehouse_schema(&PassthroughKeys, "age");
//! assert_eq!(column.field_type, "INTEGER");
//! ```

pub mod export;
pub mod leaf;

pub use export::{
    FlatField, FlatMode, Keyable, LeafDefinition, PassthroughKeys, SearchField, WarehouseField,
    WarehouseMode,
};
pub use leaf::{
    DataValidationError, IndexMode, Leaf, LeafDefinitionError, LeafKind, NativeClass,
    ValidationResult, Value,
};
