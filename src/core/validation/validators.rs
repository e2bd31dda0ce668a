//! Reusable field validators
//!
//! A validator receives the field name and its (already filtered) JSON value.
//! Validators only judge values of the type they understand and let other
//! types pass, so `required` decides presence and the others decide shape.

use crate::core::cpf::Cpf;
use crate::core::field::FieldFormat;
use serde_json::Value;

/// Boxed validator as stored in an [`EntityValidationConfig`](super::EntityValidationConfig)
pub type Validator = Box<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;

/// Validator: field is required (not null, not a blank string)
pub fn required() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        let blank = match value {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            _ => false,
        };
        if blank {
            Err(format!("O campo '{}' é obrigatório", field))
        } else {
            Ok(())
        }
    }
}

/// Validator: field is optional (always valid)
pub fn optional() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |_: &str, _: &Value| Ok(())
}

/// Validator: value must be a JSON number when present
pub fn numeric() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| match value {
        Value::Null | Value::Number(_) => Ok(()),
        other => Err(format!(
            "O campo '{}' deve ser numérico (valor: {})",
            field, other
        )),
    }
}

/// Validator: number must be positive
pub fn positive() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        if let Some(num) = value.as_f64() {
            if num <= 0.0 || !num.is_finite() {
                Err(format!(
                    "O campo '{}' deve ser positivo (valor: {})",
                    field, num
                ))
            } else {
                Ok(())
            }
        } else {
            Ok(())
        }
    }
}

/// Validator: string length (in characters) must be within range
pub fn string_length(
    min: usize,
    max: usize,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            let len = s.chars().count();
            if len < min {
                Err(format!(
                    "'{}' deve ter pelo menos {} caracteres (atual: {})",
                    field, min, len
                ))
            } else if len > max {
                Err(format!(
                    "'{}' não pode passar de {} caracteres (atual: {})",
                    field, max, len
                ))
            } else {
                Ok(())
            }
        } else {
            Ok(())
        }
    }
}

/// Validator: number must not exceed maximum
pub fn max_value(max: f64) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        if let Some(num) = value.as_f64() {
            if num > max {
                Err(format!(
                    "'{}' não pode passar de {} (valor: {})",
                    field, max, num
                ))
            } else {
                Ok(())
            }
        } else {
            Ok(())
        }
    }
}

/// Validator: number must be a whole number within `[min, max]`
pub fn integer_range(
    min: i64,
    max: i64,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        if value.is_null() || !value.is_number() {
            return Ok(());
        }
        match value.as_i64() {
            Some(n) if (min..=max).contains(&n) => Ok(()),
            Some(n) => Err(format!(
                "'{}' deve estar entre {} e {} (valor: {})",
                field, min, max, n
            )),
            None => Err(format!("'{}' deve ser um número inteiro", field)),
        }
    }
}

/// Validator: string must be a valid CPF (mask optional)
pub fn cpf() -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    |field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            Cpf::parse(s)
                .map(|_| ())
                .map_err(|e| format!("'{}' inválido: {}", field, e))
        } else {
            Ok(())
        }
    }
}

/// Validator: string must match a [`FieldFormat`]
pub fn format(
    format: FieldFormat,
) -> impl Fn(&str, &Value) -> Result<(), String> + Send + Sync + Clone {
    move |field: &str, value: &Value| {
        if let Some(s) = value.as_str() {
            if format.validate(s) {
                Ok(())
            } else {
                Err(format!("'{}' tem formato inválido (valor: {})", field, s))
            }
        } else {
            Ok(())
        }
    }
}
