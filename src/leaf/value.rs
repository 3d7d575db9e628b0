//! Native values handed to leaves for validation
//!
//! A closed sum type replaces runtime class introspection: a leaf's
//! accepted-class check is a match on [`NativeClass`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Class tag of a [`Value`], without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NativeClass {
    Null,
    Bool,
    Int,
    Float,
    Str,
}

impl NativeClass {
    /// Returns the class name for error messages
    pub fn name(&self) -> &'static str {
        match self {
            NativeClass::Null => "null",
            NativeClass::Bool => "bool",
            NativeClass::Int => "int",
            NativeClass::Float => "float",
            NativeClass::Str => "str",
        }
    }
}

impl fmt::Display for NativeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scalar value as seen by a leaf.
///
/// Integers are `i128` so that values well past the 64-bit range (which
/// the `long` leaf must reject) are still representable.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i128),
    Float(f64),
    Str(String),
}

impl Value {
    pub fn class(&self) -> NativeClass {
        match self {
            Value::Null => NativeClass::Null,
            Value::Bool(_) => NativeClass::Bool,
            Value::Int(_) => NativeClass::Int,
            Value::Float(_) => NativeClass::Float,
            Value::Str(_) => NativeClass::Str,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i128> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Converts a JSON scalar. Arrays and objects are not leaf values.
    pub fn try_from_json(json: &serde_json::Value) -> Option<Self> {
        match json {
            serde_json::Value::Null => Some(Value::Null),
            serde_json::Value::Bool(b) => Some(Value::Bool(*b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Value::Int(i as i128))
                } else if let Some(u) = n.as_u64() {
                    Some(Value::Int(u as i128))
                } else {
                    n.as_f64().map(Value::Float)
                }
            }
            serde_json::Value::String(s) => Some(Value::Str(s.clone())),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
            Value::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! int_into_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(i: $t) -> Self {
                    Value::Int(i as i128)
                }
            }
        )*
    };
}

int_into_value!(i8, i16, i32, i64, i128, u8, u16, u32, u64, isize, usize);

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(x as f64)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}
