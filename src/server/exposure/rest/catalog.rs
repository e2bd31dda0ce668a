//! Public catalog routes

use super::{HostState, parse_id};
use crate::catalog::Product;
use crate::core::error::StoreResult;
use crate::server::host::ServerHost;
use axum::extract::{Path, State};
use axum::{Json, Router, routing::get};
use serde::Serialize;
use std::sync::Arc;

/// Response for the product listing
#[derive(Debug, Serialize)]
pub struct ProductList {
    pub products: Vec<Product>,
    pub count: usize,
}

pub fn routes() -> Router<Arc<ServerHost>> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/{id}", get(get_product))
}

/// `GET /products`
pub async fn list_products(State(host): HostState) -> StoreResult<Json<ProductList>> {
    let products = host.catalog.list_products().await?;
    Ok(Json(ProductList {
        count: products.len(),
        products,
    }))
}

/// `GET /products/{id}`
pub async fn get_product(
    State(host): HostState,
    Path(id): Path<String>,
) -> StoreResult<Json<Product>> {
    let id = parse_id(&id)?;
    Ok(Json(host.catalog.get_product(&id).await?))
}
