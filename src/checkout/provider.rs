//! Payment providers
//!
//! A provider turns a priced order into a PIX "Copia e Cola" payload. The
//! storefront ships [`LocalPixProvider`], which encodes a static BR Code
//! itself; a gateway-backed provider plugs in behind the same trait.

use crate::config::MerchantConfig;
use crate::core::cpf::Cpf;
use crate::core::error::CheckoutError;
use crate::pix::{PixPayload, is_encodable_amount};
use async_trait::async_trait;

/// What a provider needs to issue a charge
#[derive(Debug, Clone)]
pub struct ChargeOrder {
    pub payment_id: String,
    /// Total in BRL, already rounded to cents
    pub amount: f64,
    /// Reference shown to the payer (the product name)
    pub description: String,
    pub payer_name: String,
    pub payer_cpf: Cpf,
}

/// Issues PIX charges
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Short name used in logs and error details
    fn name(&self) -> &str;

    /// Produce the payload the payer scans or pastes
    async fn create_charge(&self, order: &ChargeOrder) -> Result<PixPayload, CheckoutError>;
}

/// Encodes static BR Codes for the configured merchant
#[derive(Debug, Clone)]
pub struct LocalPixProvider {
    merchant: MerchantConfig,
}

impl LocalPixProvider {
    pub fn new(merchant: MerchantConfig) -> Self {
        Self { merchant }
    }
}

#[async_trait]
impl PaymentProvider for LocalPixProvider {
    fn name(&self) -> &str {
        "local"
    }

    async fn create_charge(&self, order: &ChargeOrder) -> Result<PixPayload, CheckoutError> {
        if !is_encodable_amount(order.amount) {
            return Err(CheckoutError::UnpayableTotal {
                total: order.amount,
            });
        }

        Ok(self.merchant.charge(order.amount, &order.description).encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;

    fn order(amount: f64) -> ChargeOrder {
        ChargeOrder {
            payment_id: "ORDER-1".to_string(),
            amount,
            description: "Caçamba de 4m³".to_string(),
            payer_name: "Maria".to_string(),
            payer_cpf: Cpf::parse("529.982.247-25").unwrap(),
        }
    }

    fn provider() -> LocalPixProvider {
        LocalPixProvider::new(StoreConfig::default_config().merchant)
    }

    #[tokio::test]
    async fn test_local_charge_verifies() {
        let payload = provider().create_charge(&order(290.0)).await.unwrap();
        assert!(payload.as_str().contains("5406290.00"));
        assert!(payload.has_valid_checksum());
    }

    #[tokio::test]
    async fn test_local_charge_rejects_unpayable() {
        let provider = provider();
        for amount in [f64::NAN, f64::INFINITY, -1.0, 1e13] {
            let err = provider.create_charge(&order(amount)).await.unwrap_err();
            assert!(matches!(err, CheckoutError::UnpayableTotal { .. }));
        }
    }
}
