//! REST API exposure for the storefront
//!
//! The REST exposure consumes a `ServerHost` and produces an Axum `Router`
//! with CORS and request tracing applied.

pub mod admin;
pub mod catalog;
pub mod checkout;

use super::super::host::ServerHost;
use crate::core::error::{StoreResult, ValidationError};
use anyhow::Result;
use axum::extract::State;
use axum::http::{HeaderName, header};
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

/// Router state shared by every handler
pub type HostState = State<Arc<ServerHost>>;

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from a host
    ///
    /// Returns a router with:
    /// - Health check routes
    /// - Catalog and checkout routes
    /// - Admin routes
    /// - Custom routes
    pub fn build_router(host: Arc<ServerHost>, custom_routes: Vec<Router>) -> Result<Router> {
        let mut app = Self::health_routes()
            .merge(catalog::routes())
            .merge(checkout::routes())
            .merge(admin::routes())
            .with_state(host);

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app
            .layer(Self::cors_layer())
            .layer(TraceLayer::new_for_http()))
    }

    /// CORS policy for browser clients
    pub fn cors_layer() -> CorsLayer {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers([
                header::AUTHORIZATION,
                HeaderName::from_static("x-client-info"),
                HeaderName::from_static("apikey"),
                header::CONTENT_TYPE,
            ])
    }

    fn health_routes() -> Router<Arc<ServerHost>> {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    async fn health_check(State(host): HostState) -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": "cacamba-store",
            "payment_provider": host.provider_name(),
        }))
    }
}

/// Parse a path segment as a product id
pub(crate) fn parse_id(raw: &str) -> StoreResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| {
        ValidationError::InvalidUuid {
            value: raw.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::checkout::LocalPixProvider;
    use crate::config::StoreConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn router() -> Router {
        let config = StoreConfig::default_config();
        let provider = Arc::new(LocalPixProvider::new(config.merchant.clone()));
        let host = ServerHost::from_builder_components(config, Catalog::in_memory(), provider)
            .unwrap();
        RestExposure::build_router(Arc::new(host), vec![]).unwrap()
    }

    #[tokio::test]
    async fn test_healthz_responds() {
        let response = router()
            .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_custom_routes_are_merged() {
        let config = StoreConfig::default_config();
        let provider = Arc::new(LocalPixProvider::new(config.merchant.clone()));
        let host = ServerHost::from_builder_components(config, Catalog::in_memory(), provider)
            .unwrap();
        let extra = Router::new().route("/ping", get(|| async { "pong" }));
        let app = RestExposure::build_router(Arc::new(host), vec![extra]).unwrap();

        let response = app
            .oneshot(Request::get("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_admin_route_without_token_is_unauthorized() {
        let response = router()
            .oneshot(
                Request::get("/admin/products")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);

        let err = parse_id("123").unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(err.to_string().contains("123"));
    }
}
