//! Server host holding the storefront state
//!
//! The host owns every service the HTTP surface needs. It is built once by
//! [`ServerBuilder`](super::ServerBuilder) and shared by all handlers behind
//! an `Arc`.

use crate::catalog::Catalog;
use crate::checkout::{CheckoutService, PaymentProvider};
use crate::config::StoreConfig;
use crate::core::auth::AdminSessions;
use anyhow::Result;
use axum::extract::FromRef;
use std::sync::Arc;

/// Host context containing all storefront state
///
/// # Example
///
/// ```rust,ignore
/// let host = ServerHost::from_builder_components(config, catalog, provider)?;
/// let app = RestExposure::build_router(Arc::new(host), vec![])?;
/// ```
pub struct ServerHost {
    /// Validated configuration
    pub config: Arc<StoreConfig>,

    /// Product catalog
    pub catalog: Catalog,

    /// Quotes and PIX charges
    pub checkout: CheckoutService,

    /// Admin sessions
    pub sessions: AdminSessions,

    provider: Arc<dyn PaymentProvider>,
}

impl ServerHost {
    /// Build the host from builder components
    ///
    /// Fails when the configuration does not validate.
    pub fn from_builder_components(
        config: StoreConfig,
        catalog: Catalog,
        provider: Arc<dyn PaymentProvider>,
    ) -> Result<Self> {
        config.validate()?;

        let sessions = AdminSessions::new(
            config.admin.password.clone(),
            chrono::Duration::minutes(config.admin.session_ttl_minutes),
        );
        let checkout = CheckoutService::new(catalog.clone(), provider.clone(), config.checkout.clone());

        Ok(Self {
            config: Arc::new(config),
            catalog,
            checkout,
            sessions,
            provider,
        })
    }

    /// Name of the payment provider in use
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Whether the admin panel can be used
    pub fn admin_enabled(&self) -> bool {
        self.config.admin.password.is_some()
    }
}

impl FromRef<Arc<ServerHost>> for AdminSessions {
    fn from_ref(host: &Arc<ServerHost>) -> Self {
        host.sessions.clone()
    }
}
