//! Admin panel routes
//!
//! Everything except login requires `Authorization: Bearer <token>`.

use super::{HostState, parse_id};
use crate::catalog::{NewProduct, Product, product_link};
use crate::core::auth::{AdminSession, bearer_token};
use crate::core::error::StoreResult;
use crate::core::validation::{EntityValidationConfig, ValidatableEntity, Validated, validators};
use crate::server::host::ServerHost;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::{Json, Router, routing::{delete, get, post}};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

pub fn routes() -> Router<Arc<ServerHost>> {
    Router::new()
        .route("/admin/login", post(login))
        .route("/admin/logout", post(logout))
        .route("/admin/products", get(list_products).post(create_product))
        .route("/admin/products/{id}", delete(delete_product))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

impl ValidatableEntity for LoginRequest {
    fn validation_config(_operation: &str) -> EntityValidationConfig {
        EntityValidationConfig::new("login").validate("password", validators::required())
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: Uuid,
    pub message: String,
}

/// Custom product with its shareable link
#[derive(Debug, Serialize)]
pub struct AdminProduct {
    #[serde(flatten)]
    pub product: Product,
    pub link: String,
}

impl AdminProduct {
    fn new(product: Product, base_url: &str) -> Self {
        let link = product_link(base_url, &product.id);
        Self { product, link }
    }
}

/// `POST /admin/login`
pub async fn login(
    State(host): HostState,
    payload: Validated<LoginRequest>,
) -> StoreResult<Json<LoginResponse>> {
    let request = payload.into_typed()?;
    let token = host.sessions.login(&request.password)?;

    Ok(Json(LoginResponse {
        success: true,
        token,
        message: "Autenticado com sucesso".to_string(),
    }))
}

/// `POST /admin/logout`
///
/// Revokes the presented token if it is a live session. 204 unless the
/// session table itself is unusable.
pub async fn logout(State(host): HostState, headers: HeaderMap) -> StoreResult<StatusCode> {
    if let Some(token) = bearer_token(&headers).and_then(|t| Uuid::parse_str(t).ok()) {
        host.sessions.revoke(&token)?;
    }
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /admin/products`
pub async fn list_products(
    State(host): HostState,
    _session: AdminSession,
) -> StoreResult<Json<Vec<AdminProduct>>> {
    let base_url = &host.config.server.public_base_url;
    let products = host
        .catalog
        .custom_products()
        .await?
        .into_iter()
        .map(|p| AdminProduct::new(p, base_url))
        .collect();
    Ok(Json(products))
}

/// `POST /admin/products`
pub async fn create_product(
    State(host): HostState,
    _session: AdminSession,
    payload: Validated<NewProduct>,
) -> StoreResult<(StatusCode, Json<AdminProduct>)> {
    let input = payload.into_typed()?;
    let product = host.catalog.create_product(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(AdminProduct::new(product, &host.config.server.public_base_url)),
    ))
}

/// `DELETE /admin/products/{id}`
pub async fn delete_product(
    State(host): HostState,
    _session: AdminSession,
    Path(id): Path<String>,
) -> StoreResult<StatusCode> {
    let id = parse_id(&id)?;
    host.catalog.deactivate_product(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
