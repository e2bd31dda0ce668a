//! Order quantities and totals

use crate::catalog::Product;
use crate::core::error::ValidationError;
use crate::core::field::FieldFormat;
use crate::core::validation::{EntityValidationConfig, ValidatableEntity, validators};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Round a BRL amount to whole cents
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Unit price times quantity, in cents precision
pub fn order_total(unit_price: f64, quantity: u32) -> f64 {
    round_cents(unit_price * f64::from(quantity))
}

/// Check a quantity against the configured maximum
pub fn check_quantity(quantity: u32, max: u32) -> Result<u32, ValidationError> {
    if (1..=max).contains(&quantity) {
        Ok(quantity)
    } else {
        Err(ValidationError::FieldError {
            field: "quantity".to_string(),
            message: format!("A quantidade deve estar entre 1 e {} (valor: {})", max, quantity),
        })
    }
}

/// Price check for a product and quantity
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub product_id: Uuid,
    pub quantity: u32,
}

impl ValidatableEntity for QuoteRequest {
    fn validation_config(_operation: &str) -> EntityValidationConfig {
        EntityValidationConfig::new("quote_request")
            .validate("productId", validators::required())
            .validate("productId", validators::format(FieldFormat::Uuid))
            .validate("quantity", validators::required())
            .validate("quantity", validators::integer_range(1, i64::from(u32::MAX)))
    }
}

/// Priced order line
#[derive(Debug, Clone, Serialize)]
pub struct Quote {
    pub product: Product,
    pub quantity: u32,
    pub total: f64,
}

impl Quote {
    pub fn new(product: Product, quantity: u32) -> Self {
        let total = order_total(product.price, quantity);
        Self {
            product,
            quantity,
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_total() {
        assert_eq!(order_total(290.0, 1), 290.0);
        assert_eq!(order_total(290.0, 3), 870.0);
        assert_eq!(order_total(0.1, 3), 0.3);
        assert_eq!(order_total(19.99, 7), 139.93);
    }

    #[test]
    fn test_check_quantity() {
        assert_eq!(check_quantity(1, 50).unwrap(), 1);
        assert_eq!(check_quantity(50, 50).unwrap(), 50);
        assert!(check_quantity(0, 50).is_err());
        assert!(check_quantity(51, 50).is_err());
    }

    #[test]
    fn test_quote() {
        let product = Product::builtins().remove(2);
        let quote = Quote::new(product, 2);
        assert_eq!(quote.total, 680.0);
    }

    #[test]
    fn test_quote_request_validation() {
        let config = QuoteRequest::validation_config("create");
        let id = Product::builtin_id(0);

        let ok = config
            .validate_and_filter(json!({ "productId": id.to_string(), "quantity": 2 }))
            .unwrap();
        let request: QuoteRequest = serde_json::from_value(ok).unwrap();
        assert_eq!(request.product_id, id);

        let errors = config
            .validate_and_filter(json!({ "productId": "nope", "quantity": 0 }))
            .unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
