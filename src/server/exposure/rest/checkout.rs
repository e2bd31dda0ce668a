//! Checkout routes

use super::HostState;
use crate::checkout::{PaymentRequest, PaymentResponse, Quote, QuoteRequest};
use crate::core::error::StoreResult;
use crate::core::validation::Validated;
use crate::server::host::ServerHost;
use axum::extract::State;
use axum::{Json, Router, routing::post};
use std::sync::Arc;

pub fn routes() -> Router<Arc<ServerHost>> {
    Router::new()
        .route("/checkout/quote", post(quote))
        .route("/checkout/pix", post(create_pix_charge))
}

/// `POST /checkout/quote`
pub async fn quote(
    State(host): HostState,
    payload: Validated<QuoteRequest>,
) -> StoreResult<Json<Quote>> {
    let request = payload.into_typed()?;
    Ok(Json(
        host.checkout
            .quote(&request.product_id, request.quantity)
            .await?,
    ))
}

/// `POST /checkout/pix`
pub async fn create_pix_charge(
    State(host): HostState,
    payload: Validated<PaymentRequest>,
) -> StoreResult<Json<PaymentResponse>> {
    let request = payload.into_typed()?;
    Ok(Json(host.checkout.create_pix_charge(request).await?))
}
