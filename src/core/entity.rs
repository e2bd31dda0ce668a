//! Entity trait defining the common shape of stored records

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Base trait for all stored entities.
///
/// Every entity has:
/// - id: Unique identifier
/// - name: Human-readable name
/// - created_at / updated_at: timestamps managed by the owning service
/// - active: soft-deletion flag (inactive records stay stored but are hidden)
pub trait Entity: Clone + Send + Sync + 'static {
    /// The singular resource name (e.g., "product")
    fn resource_name_singular() -> &'static str;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> Uuid;

    /// Get the display name
    fn name(&self) -> &str;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;

    /// Whether the entity is visible (not soft-deleted)
    fn is_active(&self) -> bool;

    /// Log-friendly one-line description
    fn display(&self) -> String {
        format!(
            "[{}] {} {} ({})",
            self.id(),
            Self::resource_name_singular(),
            self.name(),
            if self.is_active() { "active" } else { "inactive" }
        )
    }
}
