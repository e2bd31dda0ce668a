//! Reusable field filters
//!
//! These filters transform field values before validation

use anyhow::Result;
use serde_json::{Value, json};

/// Boxed filter as stored in an [`EntityValidationConfig`](super::EntityValidationConfig)
pub type Filter = Box<dyn Fn(&str, Value) -> Result<Value> + Send + Sync>;

/// Filter: trim whitespace from string
pub fn trim() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| {
        if let Some(s) = value.as_str() {
            Ok(Value::String(s.trim().to_string()))
        } else {
            Ok(value)
        }
    }
}

/// Filter: round number to specified decimal places
pub fn round_decimals(
    decimals: u32,
) -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    move |_: &str, value: Value| {
        if let Some(num) = value.as_f64() {
            if value.is_i64() || value.is_u64() {
                return Ok(value);
            }
            let factor = 10_f64.powi(decimals as i32);
            let rounded = (num * factor).round() / factor;
            Ok(json!(rounded))
        } else {
            Ok(value)
        }
    }
}

/// Filter: blank strings become null
///
/// Optional form fields arrive as `""` when left empty.
pub fn blank_to_null() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| match value.as_str() {
        Some(s) if s.trim().is_empty() => Ok(Value::Null),
        _ => Ok(value),
    }
}

/// Filter: numeric strings become numbers
///
/// Admin forms post prices as text (`"290.00"`).
pub fn parse_number() -> impl Fn(&str, Value) -> Result<Value> + Send + Sync + Clone {
    |_: &str, value: Value| {
        if let Some(s) = value.as_str() {
            match s.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(json!(n)),
                _ => Ok(value),
            }
        } else {
            Ok(value)
        }
    }
}
