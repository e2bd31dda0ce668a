//! Service trait for data operations

use crate::core::entity::Entity;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Service trait for managing entities
///
/// Implementations provide CRUD operations for a specific entity type.
/// Callers are agnostic to the underlying storage mechanism; the
/// storefront ships an in-memory implementation.
#[async_trait]
pub trait DataService<T: Entity>: Send + Sync {
    /// Create a new entity
    async fn create(&self, entity: T) -> Result<T>;

    /// Get an entity by ID (active or not)
    async fn get(&self, id: &Uuid) -> Result<Option<T>>;

    /// List all entities (active or not)
    async fn list(&self) -> Result<Vec<T>>;

    /// Replace an existing entity
    ///
    /// Fails with [`StorageError::MissingRecord`](crate::core::error::StorageError)
    /// when no entity has this ID.
    async fn update(&self, id: &Uuid, entity: T) -> Result<T>;

    /// Remove an entity permanently
    async fn delete(&self, id: &Uuid) -> Result<()>;
}
