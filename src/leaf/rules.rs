//! Validation rules shared across leaf kinds
//!
//! The two patterns are anchored at the start only: trailing text after a
//! matching prefix is accepted, and IPv4 octets are not bounded to 255.
//! The integer bound is `-2^n + 1 ..= 2^n - 1`. Existing data has been
//! validated against exactly these rules, so they are kept as-is.

use std::sync::OnceLock;

use chrono::{NaiveDate, Utc};
use regex::Regex;

use super::errors::{DataValidationError, ValidationResult};
use super::kind::LeafSpec;
use super::timestamp;
use super::value::Value;

static IPV4_PATTERN: OnceLock<Regex> = OnceLock::new();
static HEX_PATTERN: OnceLock<Regex> = OnceLock::new();

fn ipv4_pattern() -> &'static Regex {
    IPV4_PATTERN.get_or_init(|| {
        Regex::new(r"^([0-9]{1,3}\.){3}[0-9]{1,3}").expect("IPv4 pattern compiles")
    })
}

fn hex_pattern() -> &'static Regex {
    HEX_PATTERN.get_or_init(|| Regex::new(r"^[A-Fa-f0-9]+").expect("hex pattern compiles"))
}

/// Rejects values whose class the leaf does not accept.
pub fn check_class(spec: &LeafSpec, name: &str, value: &Value) -> ValidationResult<()> {
    let class = value.class();
    if spec.accepts(class) {
        return Ok(());
    }
    Err(DataValidationError::class_mismatch(
        name,
        &spec.accepted_names(),
        value,
        class.name(),
    ))
}

/// Inclusive `(min, max)` for a bit width.
///
/// Widths of 127 bits and more saturate at `(-i128::MAX, i128::MAX)`.
pub fn bit_width_bounds(bits: u32) -> (i128, i128) {
    match 1i128.checked_shl(bits).filter(|span| *span > 0) {
        Some(span) => (-span + 1, span - 1),
        None => (-i128::MAX, i128::MAX),
    }
}

pub fn check_bit_width(bits: u32, name: &str, value: i128) -> ValidationResult<()> {
    let (min, max) = bit_width_bounds(bits);
    if value > max {
        return Err(DataValidationError::above_max(name, value, max));
    }
    if value < min {
        return Err(DataValidationError::below_min(name, value, min));
    }
    Ok(())
}

pub fn is_ipv4_addr(value: &str) -> bool {
    ipv4_pattern().is_match(value)
}

pub fn check_ipv4(name: &str, value: &str) -> ValidationResult<()> {
    if !is_ipv4_addr(value) {
        return Err(DataValidationError::pattern(name, value, "a valid IPv4 address"));
    }
    Ok(())
}

pub fn is_hex_prefixed(value: &str) -> bool {
    hex_pattern().is_match(value)
}

pub fn check_hex_prefix(name: &str, value: &str) -> ValidationResult<()> {
    if !is_hex_prefixed(value) {
        return Err(DataValidationError::pattern(name, value, "valid Base64"));
    }
    Ok(())
}

/// Only text can hold a timestamp; any other accepted class fails here.
pub fn check_timestamp(name: &str, value: &Value) -> ValidationResult<()> {
    check_timestamp_with_default(name, value, Utc::now().date_naive())
}

/// As [`check_timestamp`], filling missing date parts from `default`.
pub fn check_timestamp_with_default(
    name: &str,
    value: &Value,
    default: NaiveDate,
) -> ValidationResult<()> {
    let text = value
        .as_str()
        .ok_or_else(|| DataValidationError::timestamp(name, value))?;
    timestamp::parse_with_default(text, default)
        .map(|_| ())
        .map_err(|_| DataValidationError::timestamp(name, value))
}
