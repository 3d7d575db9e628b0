//! Leaf type catalog
//!
//! A leaf is a scalar schema field: text, address, integer, float,
//! boolean, binary or timestamp. Each kind knows which value classes it
//! accepts and which extra rule those values must satisfy.
//!
//! # Validation
//!
//! - The value class must be one the kind accepts; no kind accepts null
//! - The kind's rule (range, pattern, timestamp) runs last
//! - Failures are reported as `DataValidationError`

mod errors;
mod instance;
mod kind;
pub mod rules;
pub mod timestamp;
mod value;

pub use errors::{
    DataValidationError, LeafDefinitionError, TimestampParseError, ValidationResult,
    ViolationKind,
};
pub use instance::Leaf;
pub use kind::{Analyzer, IndexMode, LeafKind, LeafSpec, Rule, CATALOG};
pub use value::{NativeClass, Value};
