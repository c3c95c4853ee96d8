//! Polars `AnyValue` utility functions.
//!
//! Helpers for reading individual cells regardless of the dtype Polars
//! picked for the column.

use polars::prelude::*;

/// Converts a Polars `AnyValue` to a `String`.
/// Returns an empty string for null and formats numerics without trailing zeros.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Converts `AnyValue` to `String`, returning `None` for null or blank cells.
pub fn any_to_string_non_empty(value: AnyValue<'_>) -> Option<String> {
    if matches!(value, AnyValue::Null) {
        return None;
    }
    let s = any_to_string(value);
    if s.trim().is_empty() { None } else { Some(s) }
}

fn format_numeric(v: f64) -> String {
    if v.fract() == 0.0 && v.is_finite() {
        format!("{v:.0}")
    } else {
        v.to_string()
    }
}

/// Converts an `AnyValue` to `f64`.
///
/// Booleans map to 0/1 so indicator columns can be used as predictors.
/// Returns `None` for null and for strings [`parse_f64`] rejects.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Boolean(b) => Some(if b { 1.0 } else { 0.0 }),
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(&s),
        _ => None,
    }
}

/// Parses a numeric cell.
///
/// Tolerates surrounding whitespace and thousands separators (`"1,200"`).
/// Returns `None` for blank or non-numeric strings, and for NaN so that a
/// literal `"nan"` is treated as missing rather than as a number.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    let cleaned = trimmed.replace(',', "");
    cleaned.parse::<f64>().ok().filter(|v| !v.is_nan())
}
