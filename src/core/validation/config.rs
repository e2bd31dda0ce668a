//! Per-entity validation configuration
//!
//! Holds, for each field, the filters to run (in order) and the validators
//! to check afterwards. Field order is kept so error lists are stable.

use super::filters::Filter;
use super::validators::Validator;
use crate::core::error::FieldValidationError;
use serde_json::{Map, Value};

/// Filters and validators registered for one field
struct FieldRules {
    field: String,
    filters: Vec<Filter>,
    validators: Vec<Validator>,
}

/// Validation configuration for one entity and operation
pub struct EntityValidationConfig {
    /// Entity type name (e.g. "product", "payment_request")
    pub entity_type: String,
    fields: Vec<FieldRules>,
}

impl EntityValidationConfig {
    /// Create an empty configuration
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            entity_type: entity_type.into(),
            fields: Vec::new(),
        }
    }

    fn rules_mut(&mut self, field: &str) -> &mut FieldRules {
        let idx = match self.fields.iter().position(|r| r.field == field) {
            Some(idx) => idx,
            None => {
                self.fields.push(FieldRules {
                    field: field.to_string(),
                    filters: Vec::new(),
                    validators: Vec::new(),
                });
                self.fields.len() - 1
            }
        };
        &mut self.fields[idx]
    }

    /// Register a filter for a field
    pub fn add_filter<F>(&mut self, field: &str, filter: F)
    where
        F: Fn(&str, Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.rules_mut(field).filters.push(Box::new(filter));
    }

    /// Register a validator for a field
    pub fn add_validator<V>(&mut self, field: &str, validator: V)
    where
        V: Fn(&str, &Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.rules_mut(field).validators.push(Box::new(validator));
    }

    /// Builder form of [`add_filter`](Self::add_filter)
    pub fn filter<F>(mut self, field: &str, filter: F) -> Self
    where
        F: Fn(&str, Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.add_filter(field, filter);
        self
    }

    /// Builder form of [`add_validator`](Self::add_validator)
    pub fn validate<V>(mut self, field: &str, validator: V) -> Self
    where
        V: Fn(&str, &Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.add_validator(field, validator);
        self
    }

    /// Names of the configured fields, in registration order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|r| r.field.as_str())
    }

    /// Filter every configured field, then validate it
    ///
    /// Absent fields are validated as `null` and left out of the result.
    /// Fields without rules pass through untouched. Returns the filtered
    /// payload, or every error found.
    pub fn validate_and_filter(&self, payload: Value) -> Result<Value, Vec<FieldValidationError>> {
        let mut object: Map<String, Value> = match payload {
            Value::Object(map) => map,
            other => {
                return Err(vec![FieldValidationError {
                    field: "_body".to_string(),
                    message: format!("Esperado um objeto JSON, recebido: {}", other),
                }]);
            }
        };

        let mut errors = Vec::new();

        for rules in &self.fields {
            let original = object.remove(&rules.field);
            let present = original.is_some();
            let mut value = original.unwrap_or(Value::Null);

            let mut filter_failed = false;
            for filter in &rules.filters {
                match filter(&rules.field, value.clone()) {
                    Ok(filtered) => value = filtered,
                    Err(e) => {
                        errors.push(FieldValidationError {
                            field: rules.field.clone(),
                            message: e.to_string(),
                        });
                        filter_failed = true;
                        break;
                    }
                }
            }

            if !filter_failed {
                for validator in &rules.validators {
                    if let Err(message) = validator(&rules.field, &value) {
                        errors.push(FieldValidationError {
                            field: rules.field.clone(),
                            message,
                        });
                    }
                }
            }

            // Absent fields stay absent so serde defaults apply
            if present || !value.is_null() {
                object.insert(rules.field.clone(), value);
            }
        }

        if errors.is_empty() {
            Ok(Value::Object(object))
        } else {
            Err(errors)
        }
    }
}
