//! Server module for building the storefront HTTP server
//!
//! - [`ServerBuilder`]: assembles configuration, catalog and payment provider
//! - [`ServerHost`]: the shared state behind every handler
//! - [`exposure`]: the REST surface

pub mod builder;
pub mod exposure;
pub mod host;

pub use builder::ServerBuilder;
pub use exposure::RestExposure;
pub use host::ServerHost;
