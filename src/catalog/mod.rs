//! Product catalog
//!
//! The catalog is the fixed set of built-in dumpsters plus the custom
//! products added from the admin panel. Custom products are never removed
//! from storage; deleting one only deactivates it.

pub mod product;

pub use product::{NewProduct, Product};

use crate::core::entity::Entity;
use crate::core::error::{CatalogError, StoreResult};
use crate::core::service::DataService;
use crate::storage::InMemoryDataService;
use std::sync::Arc;
use uuid::Uuid;

/// Shareable link to a product page
pub fn product_link(base_url: &str, id: &Uuid) -> String {
    format!("{}/produto/{}", base_url.trim_end_matches('/'), id)
}

/// Catalog service
#[derive(Clone)]
pub struct Catalog {
    builtins: Arc<Vec<Product>>,
    store: Arc<dyn DataService<Product>>,
}

impl Catalog {
    /// Catalog backed by the given store for custom products
    pub fn new(store: Arc<dyn DataService<Product>>) -> Self {
        Self {
            builtins: Arc::new(Product::builtins()),
            store,
        }
    }

    /// Catalog with an empty in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryDataService::<Product>::new()))
    }

    /// Built-in products followed by active custom products, newest first
    pub async fn list_products(&self) -> StoreResult<Vec<Product>> {
        let mut products: Vec<Product> = self.builtins.as_ref().clone();
        products.extend(self.custom_products().await?);
        Ok(products)
    }

    /// Active custom products, newest first
    pub async fn custom_products(&self) -> StoreResult<Vec<Product>> {
        let mut custom: Vec<Product> = self
            .store
            .list()
            .await?
            .into_iter()
            .filter(|p| p.is_active())
            .collect();
        custom.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(custom)
    }

    /// A built-in or active custom product
    pub async fn get_product(&self, id: &Uuid) -> StoreResult<Product> {
        if let Some(product) = self.builtins.iter().find(|p| p.id == *id) {
            return Ok(product.clone());
        }

        match self.store.get(id).await? {
            Some(product) if product.is_active() => Ok(product),
            _ => Err(CatalogError::NotFound { id: *id }.into()),
        }
    }

    /// Add a custom product
    pub async fn create_product(&self, input: NewProduct) -> StoreResult<Product> {
        let product = self.store.create(Product::new(input)).await?;
        tracing::info!(product = %product.display(), price = product.price, "product created");
        Ok(product)
    }

    /// Soft-delete a custom product
    pub async fn deactivate_product(&self, id: &Uuid) -> StoreResult<Product> {
        if self.builtins.iter().any(|p| p.id == *id) {
            return Err(CatalogError::BuiltinReadOnly { id: *id }.into());
        }

        let mut product = match self.store.get(id).await? {
            Some(product) if product.is_active() => product,
            _ => return Err(CatalogError::NotFound { id: *id }.into()),
        };

        product.deactivate();
        let product = self.store.update(id, product).await?;
        tracing::info!(product = %product.display(), "product deactivated");
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_product(name: &str, price: f64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price,
            image: None,
            description: None,
        }
    }

    #[test]
    fn test_product_link() {
        let id = Uuid::nil();
        assert_eq!(
            product_link("https://loja.example.com/", &id),
            format!("https://loja.example.com/produto/{}", id)
        );
        assert_eq!(
            product_link("http://localhost:3000", &id),
            format!("http://localhost:3000/produto/{}", id)
        );
    }

    #[tokio::test]
    async fn test_list_starts_with_builtins() {
        let catalog = Catalog::in_memory();
        let products = catalog.list_products().await.unwrap();
        assert_eq!(products.len(), 4);
        assert!(products.iter().all(|p| p.builtin));
    }

    #[tokio::test]
    async fn test_custom_products_newest_first() {
        let catalog = Catalog::in_memory();
        let older = catalog.create_product(new_product("A", 10.0)).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let newer = catalog.create_product(new_product("B", 20.0)).await.unwrap();

        let products = catalog.list_products().await.unwrap();
        assert_eq!(products.len(), 6);
        assert_eq!(products[4].id, newer.id);
        assert_eq!(products[5].id, older.id);
    }

    #[tokio::test]
    async fn test_get_builtin_and_custom() {
        let catalog = Catalog::in_memory();
        let builtin = catalog.get_product(&Product::builtin_id(0)).await.unwrap();
        assert_eq!(builtin.price, 290.0);

        let created = catalog.create_product(new_product("C", 30.0)).await.unwrap();
        let fetched = catalog.get_product(&created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_unknown_is_not_found() {
        let err = Catalog::in_memory()
            .get_product(&Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "PRODUCT_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_deactivate_hides_product() {
        let catalog = Catalog::in_memory();
        let created = catalog.create_product(new_product("D", 40.0)).await.unwrap();

        let deactivated = catalog.deactivate_product(&created.id).await.unwrap();
        assert!(!deactivated.active);

        assert_eq!(catalog.list_products().await.unwrap().len(), 4);
        assert!(catalog.get_product(&created.id).await.is_err());

        // Second delete: already gone
        let err = catalog.deactivate_product(&created.id).await.unwrap_err();
        assert_eq!(err.error_code(), "PRODUCT_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_builtin_cannot_be_deactivated() {
        let catalog = Catalog::in_memory();
        let err = catalog
            .deactivate_product(&Product::builtin_id(1))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "PRODUCT_READ_ONLY");
        assert_eq!(catalog.list_products().await.unwrap().len(), 4);
    }
}
