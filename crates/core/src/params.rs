//! Pure helper functions for extracting typed parameters from a `serde_json::Value` object.
//!
//! Each helper takes a JSON value, a key name, and a default. If the key is
//! missing or the value is not the expected type, the default is returned.
//! These never fail; they always produce a usable value.

use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// Accepts both JSON numbers (including integers) and converts them to f64.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `u32` from `params[name]`, returning `default` if missing, wrong
/// type, negative, or too large.
pub fn param_u32(params: &Value, name: &str, default: u32) -> u32 {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`, returning `default` if missing or wrong type.
///
/// Only succeeds if the JSON value is a non-negative integer that fits in `u64`,
/// then converts to `usize`.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .map(|v| v as usize)
        .unwrap_or(default)
}

/// Extracts a `[lo, hi]` pair of numbers from `params[name]`.
///
/// Returns `default` unless the value is an array of exactly two numbers.
pub fn param_range(params: &Value, name: &str, default: (f64, f64)) -> (f64, f64) {
    match params.get(name).and_then(Value::as_array).map(Vec::as_slice) {
        Some([lo, hi]) => match (lo.as_f64(), hi.as_f64()) {
            (Some(lo), Some(hi)) => (lo, hi),
            _ => default,
        },
        _ => default,
    }
}
