//! # Caçamba Store
//!
//! Storefront backend for a dumpster (caçamba) rental business. Customers
//! pick a product and a quantity, identify themselves with a CPF, and pay
//! through a PIX "Copia e Cola" payload.
//!
//! ## Features
//!
//! - **PIX BR Code**: static EMV payload encoder with CRC-16/CCITT-FALSE
//! - **Catalog**: built-in products plus admin-managed custom products with soft delete
//! - **Checkout**: quotes, CPF validation, pluggable payment providers
//! - **Admin**: password login with expiring bearer sessions
//! - **Configuration**: YAML file with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cacamba::prelude::*;
//! use std::path::Path;
//!
//! let config = StoreConfig::load(Some(Path::new("store.yaml")))?;
//! ServerBuilder::new().with_config(config).serve().await?;
//! ```
//!
//! The encoder can be used on its own:
//!
//! ```rust
//! let payload = cacamba::pix::encode(
//!     "pix@example.com",
//!     "LOJA TESTE",
//!     "SAO PAULO",
//!     100.0,
//!     "Produto",
//! );
//! assert!(payload.as_str().starts_with("000201"));
//! assert!(payload.has_valid_checksum());
//! ```

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod core;
pub mod pix;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        auth::{AdminSession, AdminSessions, AuthContext, AuthPolicy, AuthProvider},
        cpf::Cpf,
        entity::Entity,
        error::{StoreError, StoreResult},
        field::FieldFormat,
        service::DataService,
        validation::{EntityValidationConfig, ValidatableEntity, Validated},
    };

    // === PIX ===
    pub use crate::pix::{PixChargeRequest, PixPayload, encode};

    // === Catalog & checkout ===
    pub use crate::catalog::{Catalog, NewProduct, Product, product_link};
    pub use crate::checkout::{
        ChargeOrder, CheckoutService, LocalPixProvider, PaymentProvider, PaymentRequest,
        PaymentResponse,
    };

    // === Storage ===
    pub use crate::storage::InMemoryDataService;

    // === Config ===
    pub use crate::config::StoreConfig;

    // === Server ===
    pub use crate::server::{RestExposure, ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;

    // === Axum ===
    pub use axum::{
        Router,
        routing::{delete, get, post},
    };
}
