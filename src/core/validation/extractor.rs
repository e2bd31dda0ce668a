//! Axum extractor for validated payloads
//!
//! This module provides the `Validated<T>` extractor that automatically
//! validates and filters request payloads before they reach handlers.

use super::config::EntityValidationConfig;
use crate::core::error::{StoreError, ValidationError};
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Trait for payloads that support validation
pub trait ValidatableEntity {
    /// Get the validation configuration for a specific operation
    fn validation_config(operation: &str) -> EntityValidationConfig;
}

/// Axum extractor that validates and filters a JSON body
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_product(
///     Validated(payload, _): Validated<NewProduct>,
/// ) -> Result<Json<Product>, StoreError> {
///     // payload is already filtered and validated
/// }
/// ```
pub struct Validated<T>(pub Value, std::marker::PhantomData<T>);

impl<T> Validated<T> {
    /// Create a new validated payload
    pub fn new(payload: Value) -> Self {
        Self(payload, std::marker::PhantomData)
    }

    /// Get the inner payload
    pub fn into_inner(self) -> Value {
        self.0
    }
}

impl<T: DeserializeOwned> Validated<T> {
    /// Deserialize the filtered payload into its typed form
    pub fn into_typed(self) -> Result<T, StoreError> {
        Ok(serde_json::from_value(self.0)?)
    }
}

// Allow dereferencing to Value
impl<T> std::ops::Deref for Validated<T> {
    type Target = Value;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: ValidatableEntity + Send + Sync,
{
    type Rejection = StoreError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let method = req.method().clone();

        let Json(payload): Json<Value> = Json::from_request(req, state).await.map_err(|e| {
            StoreError::Validation(ValidationError::InvalidJson {
                message: e.body_text(),
            })
        })?;

        // Determine operation from HTTP method
        let operation = match method.as_str() {
            "PUT" | "PATCH" => "update",
            _ => "create",
        };

        let config = T::validation_config(operation);

        match config.validate_and_filter(payload) {
            Ok(validated) => Ok(Validated::new(validated)),
            Err(errors) => {
                tracing::debug!(
                    entity = %config.entity_type,
                    errors = errors.len(),
                    "payload rejected"
                );
                Err(StoreError::Validation(ValidationError::FieldErrors(errors)))
            }
        }
    }
}
