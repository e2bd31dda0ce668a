//! ServerBuilder for fluent API to build the storefront server

use super::exposure::RestExposure;
use super::host::ServerHost;
use crate::catalog::{Catalog, Product};
use crate::checkout::{LocalPixProvider, PaymentProvider};
use crate::config::StoreConfig;
use crate::core::service::DataService;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the storefront HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(StoreConfig::load(None)?)
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: Option<StoreConfig>,
    product_store: Option<Arc<dyn DataService<Product>>>,
    provider: Option<Arc<dyn PaymentProvider>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            config: None,
            product_store: None,
            provider: None,
            custom_routes: Vec::new(),
        }
    }

    /// Set the configuration (required)
    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Store for custom products
    ///
    /// Defaults to an in-memory store.
    pub fn with_product_store(mut self, store: impl DataService<Product> + 'static) -> Self {
        self.product_store = Some(Arc::new(store));
        self
    }

    /// Payment provider issuing PIX charges
    ///
    /// Defaults to [`LocalPixProvider`] for the configured merchant.
    pub fn with_payment_provider(mut self, provider: impl PaymentProvider + 'static) -> Self {
        self.provider = Some(Arc::new(provider));
        self
    }

    /// Add custom routes to the server
    ///
    /// Use this for pages or endpoints outside the storefront API, such as
    /// serving the static front end.
    ///
    /// ```ignore
    /// let pages = Router::new().route("/produto/{id}", get(product_page));
    ///
    /// ServerBuilder::new()
    ///     .with_config(config)
    ///     .with_custom_routes(pages)
    ///     .build()?;
    /// ```
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the host
    pub fn build_host(mut self) -> Result<ServerHost> {
        let config = self
            .config
            .take()
            .ok_or_else(|| anyhow::anyhow!("StoreConfig is required. Call .with_config()"))?;

        let catalog = match self.product_store.take() {
            Some(store) => Catalog::new(store),
            None => Catalog::in_memory(),
        };

        let provider = match self.provider.take() {
            Some(provider) => provider,
            None => Arc::new(LocalPixProvider::new(config.merchant.clone())),
        };

        ServerHost::from_builder_components(config, catalog, provider)
    }

    /// Build the final REST router
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);
        RestExposure::build_router(host, custom_routes)
    }

    /// Serve on the configured bind address with graceful shutdown
    ///
    /// Handles SIGTERM and SIGINT (Ctrl+C).
    pub async fn serve(mut self) -> Result<()> {
        let addr = self
            .config
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("StoreConfig is required. Call .with_config()"))?
            .bind_addr()?;

        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);
        tracing::info!(
            provider = host.provider_name(),
            admin = host.admin_enabled(),
            "storefront ready"
        );
        let app = RestExposure::build_router(host, custom_routes)?;

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
