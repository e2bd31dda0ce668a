//! Product entity

use crate::core::entity::Entity;
use crate::core::field::FieldFormat;
use crate::core::validation::{EntityValidationConfig, ValidatableEntity, filters, validators};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Longest accepted product name
pub const MAX_NAME_LEN: usize = 120;

/// Highest accepted unit price, in BRL
pub const MAX_PRICE: f64 = 1_000_000.0;

/// Namespace for the ids of built-in products
const BUILTIN_NAMESPACE: Uuid = Uuid::from_u128(0x6a1c_2f0e_93b4_4c57_8d2e_0c5a_7f31_e9b2);

/// The fixed catalog: (name, price, image)
const BUILTINS: [(&str, f64, &str); 4] = [
    ("Caçamba de 4m³", 290.0, "/assets/cacamba-4m3.jpg"),
    ("Caçamba de 3m³", 260.0, "/assets/cacamba-3m3.jpg"),
    ("Caçamba de 5m³", 340.0, "/assets/cacamba-5m3.jpg"),
    ("Caçamba de 7m³", 380.0, "/assets/cacamba-7m3.jpg"),
];

/// A rentable item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    /// Unit price in BRL
    pub price: f64,
    pub image: Option<String>,
    pub description: Option<String>,
    pub active: bool,
    /// Part of the fixed catalog; cannot be removed
    pub builtin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Create a custom product from validated input
    pub fn new(input: NewProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            price: input.price,
            image: input.image,
            description: input.description,
            active: true,
            builtin: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Hide the product from listings and checkout
    pub fn deactivate(&mut self) {
        self.active = false;
        self.updated_at = Utc::now();
    }

    /// Stable id of the built-in product at `position`
    pub fn builtin_id(position: usize) -> Uuid {
        Uuid::new_v5(&BUILTIN_NAMESPACE, format!("builtin-{}", position + 1).as_bytes())
    }

    /// The fixed catalog, in display order
    pub fn builtins() -> Vec<Product> {
        let at = DateTime::<Utc>::default();
        BUILTINS
            .iter()
            .enumerate()
            .map(|(position, (name, price, image))| Product {
                id: Self::builtin_id(position),
                name: name.to_string(),
                price: *price,
                image: Some(image.to_string()),
                description: None,
                active: true,
                builtin: true,
                created_at: at,
                updated_at: at,
            })
            .collect()
    }
}

impl Entity for Product {
    fn resource_name_singular() -> &'static str {
        "product"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

/// Admin form for a custom product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ValidatableEntity for NewProduct {
    fn validation_config(_operation: &str) -> EntityValidationConfig {
        EntityValidationConfig::new("product")
            .filter("name", filters::trim())
            .validate("name", validators::required())
            .validate("name", validators::string_length(1, MAX_NAME_LEN))
            .filter("price", filters::parse_number())
            .filter("price", filters::round_decimals(2))
            .validate("price", validators::required())
            .validate("price", validators::numeric())
            .validate("price", validators::positive())
            .validate("price", validators::max_value(MAX_PRICE))
            .filter("image", filters::trim())
            .filter("image", filters::blank_to_null())
            .validate("image", validators::optional())
            .validate("image", validators::format(FieldFormat::Url))
            .filter("description", filters::trim())
            .filter("description", filters::blank_to_null())
            .validate("description", validators::optional())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> EntityValidationConfig {
        NewProduct::validation_config("create")
    }

    #[test]
    fn test_builtins() {
        let builtins = Product::builtins();
        assert_eq!(builtins.len(), 4);
        assert_eq!(builtins[0].name, "Caçamba de 4m³");
        assert_eq!(builtins[0].price, 290.0);
        assert_eq!(builtins[3].price, 380.0);
        assert!(builtins.iter().all(|p| p.builtin && p.active));
    }

    #[test]
    fn test_builtin_ids_are_stable_and_distinct() {
        let first = Product::builtins();
        let second = Product::builtins();
        assert_eq!(first[0].id, second[0].id);
        assert_eq!(first[2].id, Product::builtin_id(2));

        let mut ids: Vec<_> = first.iter().map(|p| p.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn test_new_product_is_custom_and_active() {
        let product = Product::new(NewProduct {
            name: "Caçamba de 10m³".to_string(),
            price: 450.0,
            image: None,
            description: None,
        });
        assert!(product.active);
        assert!(!product.builtin);
        assert_eq!(product.created_at, product.updated_at);
    }

    #[test]
    fn test_deactivate() {
        let mut product = Product::builtins().remove(0);
        product.deactivate();
        assert!(!product.is_active());
        assert!(product.updated_at > product.created_at);
    }

    #[test]
    fn test_display_names_the_product() {
        let mut product = Product::builtins().remove(0);
        assert!(product.display().ends_with("product Caçamba de 4m³ (active)"));

        product.deactivate();
        assert!(product.display().ends_with("(inactive)"));
    }

    #[test]
    fn test_validation_filters_and_accepts() {
        let result = config()
            .validate_and_filter(json!({
                "name": "  Caçamba de 10m³ ",
                "price": "450.456",
                "image": "",
                "description": "  Entulho leve "
            }))
            .unwrap();

        assert_eq!(result["name"], json!("Caçamba de 10m³"));
        assert_eq!(result["price"], json!(450.46));
        assert_eq!(result["image"], json!(null));
        assert_eq!(result["description"], json!("Entulho leve"));

        let product: NewProduct = serde_json::from_value(result).unwrap();
        assert_eq!(product.image, None);
    }

    #[test]
    fn test_validation_rejects_bad_input() {
        let errors = config()
            .validate_and_filter(json!({
                "name": "   ",
                "price": -10,
                "image": "ftp://example.com/x.jpg"
            }))
            .unwrap_err();

        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"name"));
        assert!(fields.contains(&"price"));
        assert!(fields.contains(&"image"));
    }

    #[test]
    fn test_validation_price_limits() {
        assert!(
            config()
                .validate_and_filter(json!({ "name": "x", "price": 1_000_001 }))
                .is_err()
        );
        assert!(
            config()
                .validate_and_filter(json!({ "name": "x", "price": "abc" }))
                .is_err()
        );
        assert!(
            config()
                .validate_and_filter(json!({ "name": "x", "price": 1_000_000 }))
                .is_ok()
        );
    }

    #[test]
    fn test_validation_name_length() {
        let long = "a".repeat(MAX_NAME_LEN + 1);
        assert!(
            config()
                .validate_and_filter(json!({ "name": long, "price": 10 }))
                .is_err()
        );
    }
}
