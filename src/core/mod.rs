//! Core building blocks shared by the catalog, checkout and server layers

pub mod auth;
pub mod cpf;
pub mod entity;
pub mod error;
pub mod field;
pub mod service;
pub mod validation;

pub use auth::{AdminSession, AdminSessions, AuthContext, AuthPolicy, AuthProvider};
pub use cpf::Cpf;
pub use entity::Entity;
pub use error::{StoreError, StoreResult};
pub use field::FieldFormat;
pub use service::DataService;
