//! Typed error handling for the storefront
//!
//! Every failure a handler can produce is a [`StoreError`]. Each variant maps
//! to an HTTP status and a stable error code, and renders as
//! `{ "error": ..., "code": ..., "details": ... }`.
//!
//! # Error Categories
//!
//! - [`CatalogError`]: product lookups and admin product management
//! - [`CheckoutError`]: quoting and PIX charge generation
//! - [`ValidationError`]: malformed or invalid input
//! - [`AuthError`]: admin login and session tokens
//! - [`ConfigError`]: configuration loading and validation
//! - [`StorageError`]: storage backend failures
//!
//! # Example
//!
//! ```rust,ignore
//! match catalog.get_product(&id).await {
//!     Err(StoreError::Catalog(CatalogError::NotFound { id })) => {
//!         println!("Product {} not found", id);
//!     }
//!     other => { /* ... */ }
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// The main error type for the storefront
#[derive(Debug)]
pub enum StoreError {
    /// Catalog errors
    Catalog(CatalogError),

    /// Checkout and payment errors
    Checkout(CheckoutError),

    /// Input validation errors
    Validation(ValidationError),

    /// Admin authentication errors
    Auth(AuthError),

    /// Configuration errors
    Config(ConfigError),

    /// Storage backend errors
    Storage(StorageError),

    /// Unexpected internal errors
    Internal(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Catalog(e) => write!(f, "{}", e),
            StoreError::Checkout(e) => write!(f, "{}", e),
            StoreError::Validation(e) => write!(f, "{}", e),
            StoreError::Auth(e) => write!(f, "{}", e),
            StoreError::Config(e) => write!(f, "{}", e),
            StoreError::Storage(e) => write!(f, "{}", e),
            StoreError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Catalog(e) => Some(e),
            StoreError::Checkout(e) => Some(e),
            StoreError::Validation(e) => Some(e),
            StoreError::Auth(e) => Some(e),
            StoreError::Config(e) => Some(e),
            StoreError::Storage(e) => Some(e),
            StoreError::Internal(_) => None,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Error code for programmatic handling
    pub code: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl StoreError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            StoreError::Catalog(e) => e.status_code(),
            StoreError::Checkout(e) => e.status_code(),
            StoreError::Validation(_) => StatusCode::BAD_REQUEST,
            StoreError::Auth(e) => e.status_code(),
            StoreError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            StoreError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            StoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::Catalog(e) => e.error_code(),
            StoreError::Checkout(e) => e.error_code(),
            StoreError::Validation(_) => "VALIDATION_ERROR",
            StoreError::Auth(e) => e.error_code(),
            StoreError::Config(_) => "CONFIG_ERROR",
            StoreError::Storage(_) => "STORAGE_ERROR",
            StoreError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
            code: self.error_code().to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            StoreError::Catalog(CatalogError::NotFound { id })
            | StoreError::Catalog(CatalogError::BuiltinReadOnly { id }) => {
                Some(serde_json::json!({ "product_id": id.to_string() }))
            }
            StoreError::Checkout(CheckoutError::ProviderFailed { provider, message }) => {
                Some(serde_json::json!({ "provider": provider, "message": message }))
            }
            StoreError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            StoreError::Validation(ValidationError::FieldError { field, message }) => {
                Some(serde_json::json!({ "fields": [{ "field": field, "message": message }] }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Catalog Errors
// =============================================================================

/// Errors related to the product catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Product does not exist or is no longer active
    #[error("Product '{id}' not found")]
    NotFound { id: Uuid },

    /// Built-in products cannot be changed through the admin panel
    #[error("Product '{id}' is part of the built-in catalog and cannot be removed")]
    BuiltinReadOnly { id: Uuid },
}

impl CatalogError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
            CatalogError::BuiltinReadOnly { .. } => StatusCode::FORBIDDEN,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            CatalogError::NotFound { .. } => "PRODUCT_NOT_FOUND",
            CatalogError::BuiltinReadOnly { .. } => "PRODUCT_READ_ONLY",
        }
    }
}

impl From<CatalogError> for StoreError {
    fn from(err: CatalogError) -> Self {
        StoreError::Catalog(err)
    }
}

// =============================================================================
// Checkout Errors
// =============================================================================

/// Errors related to checkout and charge generation
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    /// The payment provider could not produce a charge
    #[error("Failed to generate QR Code via {provider}: {message}")]
    ProviderFailed { provider: String, message: String },

    /// Order total does not fit a PIX amount
    #[error("Order total {total} is not a payable amount")]
    UnpayableTotal { total: f64 },
}

impl CheckoutError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CheckoutError::ProviderFailed { .. } => StatusCode::BAD_GATEWAY,
            CheckoutError::UnpayableTotal { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            CheckoutError::ProviderFailed { .. } => "PAYMENT_PROVIDER_FAILED",
            CheckoutError::UnpayableTotal { .. } => "UNPAYABLE_TOTAL",
        }
    }
}

impl From<CheckoutError> for StoreError {
    fn from(err: CheckoutError) -> Self {
        StoreError::Checkout(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// Single field validation error
    #[error("Validation error for field '{field}': {message}")]
    FieldError { field: String, message: String },

    /// Multiple field validation errors
    #[error("Validation errors: {}", join_field_errors(.0))]
    FieldErrors(Vec<FieldValidationError>),

    /// Invalid JSON body
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },

    /// Invalid UUID in a path
    #[error("Invalid UUID format: {value}")]
    InvalidUuid { value: String },
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

fn join_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Validation(err)
    }
}

// =============================================================================
// Auth Errors
// =============================================================================

/// Errors related to admin authentication
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No bearer token on an admin route
    #[error("Authentication required")]
    MissingToken,

    /// Token unknown, revoked or expired
    #[error("Invalid or expired session")]
    InvalidToken,

    /// Admin password did not match
    #[error("Incorrect password")]
    WrongPassword,
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "AUTH_REQUIRED",
            AuthError::InvalidToken => "AUTH_INVALID_TOKEN",
            AuthError::WrongPassword => "AUTH_WRONG_PASSWORD",
        }
    }
}

impl From<AuthError> for StoreError {
    fn from(err: AuthError) -> Self {
        StoreError::Auth(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required setting is absent
    #[error("Missing configuration value '{key}'")]
    MissingValue { key: String },

    /// A setting is present but unusable
    #[error("Invalid configuration value '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Configuration file could not be parsed
    #[error("Failed to parse configuration{}: {message}", file_suffix(.file))]
    ParseError {
        file: Option<String>,
        message: String,
    },
}

fn file_suffix(file: &Option<String>) -> String {
    file.as_deref()
        .map(|f| format!(" '{}'", f))
        .unwrap_or_default()
}

impl From<ConfigError> for StoreError {
    fn from(err: ConfigError) -> Self {
        StoreError::Config(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A lock guarding in-memory state was poisoned
    #[error("Storage lock poisoned: {message}")]
    LockPoisoned { message: String },

    /// Record missing on update
    #[error("Record '{id}' not found in storage")]
    MissingRecord { id: Uuid },
}

impl From<StorageError> for StoreError {
    fn from(err: StorageError) -> Self {
        StoreError::Storage(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

impl From<uuid::Error> for StoreError {
    fn from(err: uuid::Error) -> Self {
        StoreError::Validation(ValidationError::InvalidUuid {
            value: err.to_string(),
        })
    }
}

/// Storage services return `anyhow::Result`; recover typed errors when the
/// chain carries one
impl From<anyhow::Error> for StoreError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<StorageError>() {
            Ok(storage) => StoreError::Storage(storage),
            Err(err) => StoreError::Internal(err.to_string()),
        }
    }
}

/// A specialized Result type for storefront operations
pub type StoreResult<T> = Result<T, StoreError>;
