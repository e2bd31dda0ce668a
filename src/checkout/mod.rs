//! Checkout: quotes and PIX charges
//!
//! The payer posts their name, CPF and the order total; the service asks the
//! configured [`PaymentProvider`] for a payload and returns it together with
//! a link to a rendered QR image.

pub mod order;
pub mod provider;

pub use order::{Quote, QuoteRequest, check_quantity, order_total, round_cents};
pub use provider::{ChargeOrder, LocalPixProvider, PaymentProvider};

use crate::catalog::Catalog;
use crate::config::CheckoutConfig;
use crate::core::cpf::Cpf;
use crate::core::error::{CheckoutError, StoreResult};
use crate::core::validation::{EntityValidationConfig, ValidatableEntity, filters, validators};
use crate::pix::PixPayload;
use chrono::{DateTime, Utc};
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Message returned with every generated charge
pub const CHARGE_MESSAGE: &str = "QR Code gerado com sucesso";

/// Checkout form as posted by the storefront
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub name: String,
    pub cpf: Cpf,
    /// Order total in BRL
    pub amount: f64,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl ValidatableEntity for PaymentRequest {
    fn validation_config(_operation: &str) -> EntityValidationConfig {
        EntityValidationConfig::new("payment_request")
            .filter("name", filters::trim())
            .validate("name", validators::required())
            .validate("cpf", validators::required())
            .validate("cpf", validators::cpf())
            .filter("amount", filters::round_decimals(2))
            .validate("amount", validators::required())
            .validate("amount", validators::numeric())
            .validate("amount", validators::positive())
            .filter("productName", filters::trim())
            .validate("productName", validators::optional())
            .validate("quantity", validators::integer_range(1, i64::from(u32::MAX)))
    }
}

/// Successful charge
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub success: bool,
    pub qr_code: PixPayload,
    pub qr_code_image_url: String,
    pub payment_id: String,
    pub amount: f64,
    pub message: String,
}

/// `ORDER-<unix millis>`
pub fn payment_id(at: DateTime<Utc>) -> String {
    format!("ORDER-{}", at.timestamp_millis())
}

/// URL of a rendered QR image for `payload`
pub fn qr_image_url(base_url: &str, size: u32, payload: &str) -> String {
    format!(
        "{}?size={}x{}&data={}",
        base_url,
        size,
        size,
        utf8_percent_encode(payload, NON_ALPHANUMERIC)
    )
}

/// Checkout service
#[derive(Clone)]
pub struct CheckoutService {
    catalog: Catalog,
    provider: Arc<dyn PaymentProvider>,
    config: CheckoutConfig,
}

impl CheckoutService {
    pub fn new(catalog: Catalog, provider: Arc<dyn PaymentProvider>, config: CheckoutConfig) -> Self {
        Self {
            catalog,
            provider,
            config,
        }
    }

    /// Price `quantity` units of a product
    pub async fn quote(&self, product_id: &Uuid, quantity: u32) -> StoreResult<Quote> {
        let quantity = check_quantity(quantity, self.config.max_quantity)?;
        let product = self.catalog.get_product(product_id).await?;
        Ok(Quote::new(product, quantity))
    }

    /// Issue a PIX charge for a validated checkout form
    pub async fn create_pix_charge(&self, request: PaymentRequest) -> StoreResult<PaymentResponse> {
        let quantity = check_quantity(request.quantity, self.config.max_quantity)?;
        let amount = round_cents(request.amount);

        let order = ChargeOrder {
            payment_id: payment_id(Utc::now()),
            amount,
            description: request.product_name.unwrap_or_default(),
            payer_name: request.name,
            payer_cpf: request.cpf,
        };

        tracing::info!(
            payment_id = %order.payment_id,
            payer = %order.payer_cpf.redacted(),
            amount,
            product = %order.description,
            quantity,
            provider = self.provider.name(),
            "generating PIX charge"
        );

        let qr_code = match self.provider.create_charge(&order).await {
            Ok(payload) => payload,
            Err(err @ CheckoutError::UnpayableTotal { .. }) => return Err(err.into()),
            Err(err) => {
                tracing::warn!(payment_id = %order.payment_id, error = %err, "provider failed");
                return Err(CheckoutError::ProviderFailed {
                    provider: self.provider.name().to_string(),
                    message: err.to_string(),
                }
                .into());
            }
        };

        tracing::debug!(
            payment_id = %order.payment_id,
            payload_len = qr_code.as_str().len(),
            "PIX charge generated"
        );

        Ok(PaymentResponse {
            success: true,
            qr_code_image_url: qr_image_url(
                &self.config.qr_image_base_url,
                self.config.qr_image_size,
                qr_code.as_str(),
            ),
            qr_code,
            payment_id: order.payment_id,
            amount,
            message: CHARGE_MESSAGE.to_string(),
        })
    }
}
