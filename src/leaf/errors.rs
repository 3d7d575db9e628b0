//! Leaf error types
//!
//! Every validation failure is a [`DataValidationError`]. The message is the
//! contract; [`ViolationKind`] is attached for callers that want to branch
//! without parsing text.

use std::fmt;

use thiserror::Error;

/// Which check rejected the value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// Value class not accepted by the leaf
    ClassMismatch,
    /// Integer above the bit-width maximum
    AboveMax,
    /// Integer below the bit-width minimum
    BelowMin,
    /// String did not match the leaf's pattern
    Pattern,
    /// String could not be parsed as a timestamp
    Timestamp,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::ClassMismatch => "class_mismatch",
            ViolationKind::AboveMax => "above_max",
            ViolationKind::BelowMin => "below_min",
            ViolationKind::Pattern => "pattern",
            ViolationKind::Timestamp => "timestamp",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value was rejected by a leaf.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DataValidationError {
    field: String,
    kind: ViolationKind,
    message: String,
}

impl DataValidationError {
    fn new(field: impl Into<String>, kind: ViolationKind, message: String) -> Self {
        Self {
            field: field.into(),
            kind,
            message,
        }
    }

    /// Value class is not one the leaf accepts
    pub fn class_mismatch(
        field: impl Into<String>,
        expected: &str,
        value: impl fmt::Display,
        actual: &str,
    ) -> Self {
        let field = field.into();
        let message = format!(
            "class mismatch for {}: expected {}, {} has class {}",
            field, expected, value, actual
        );
        Self::new(field, ViolationKind::ClassMismatch, message)
    }

    pub fn above_max(field: impl Into<String>, value: i128, max: i128) -> Self {
        let field = field.into();
        let message = format!("{}: {} is larger than max ({})", field, value, max);
        Self::new(field, ViolationKind::AboveMax, message)
    }

    pub fn below_min(field: impl Into<String>, value: i128, min: i128) -> Self {
        let field = field.into();
        let message = format!("{}: {} is smaller than min ({})", field, value, min);
        Self::new(field, ViolationKind::BelowMin, message)
    }

    /// String failed a format pattern; `what` names the expected format
    pub fn pattern(field: impl Into<String>, value: &str, what: &str) -> Self {
        let field = field.into();
        let message = format!("{}: the value {} is not {}", field, value, what);
        Self::new(field, ViolationKind::Pattern, message)
    }

    pub fn timestamp(field: impl Into<String>, value: impl fmt::Display) -> Self {
        let field = field.into();
        let message = format!("{}: {} is not valid timestamp", field, value);
        Self::new(field, ViolationKind::Timestamp, message)
    }

    /// Field name the failure was reported against
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn kind(&self) -> ViolationKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result type for leaf validation
pub type ValidationResult<T> = Result<T, DataValidationError>;

/// Leaf definition loading errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeafDefinitionError {
    #[error("Unknown leaf type: {0}")]
    UnknownKind(String),

    #[error("Malformed leaf definition: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for LeafDefinitionError {
    fn from(err: serde_json::Error) -> Self {
        LeafDefinitionError::Malformed(err.to_string())
    }
}

/// Timestamp parser errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimestampParseError {
    #[error("empty timestamp")]
    Empty,

    #[error("unknown token '{0}'")]
    UnknownToken(String),

    #[error("{0} given more than once")]
    Duplicate(&'static str),

    #[error("no such date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    #[error("no such time {hour:02}:{minute:02}:{second:02}")]
    InvalidTime { hour: u32, minute: u32, second: u32 },

    #[error("timestamp has no date or time components")]
    NoComponents,
}
