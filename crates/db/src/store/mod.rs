//! The record store seam used by the car service.
//!
//! [`CarStore`] is CRUD only; validation and the uniqueness rule belong to the
//! service. Both implementations enforce per-field uniqueness on `vin` and
//! `registration_number` so duplicate writes that race past the service check
//! are still rejected.

mod memory;
mod postgres;

use async_trait::async_trait;
use fleet_core::car::CarPayload;
use fleet_core::types::DbId;

use crate::models::car::Car;

pub use memory::MemoryCarStore;
pub use postgres::PgCarStore;

/// Constraint name reported when a `vin` is already stored.
pub const VIN_CONSTRAINT: &str = "uq_cars_vin";

/// Constraint name reported when a registration number is already stored.
pub const REGISTRATION_CONSTRAINT: &str = "uq_cars_registration_number";

/// Failures raised by a record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A per-field unique constraint rejected the write.
    #[error("Duplicate value violates unique constraint: {constraint}")]
    UniqueViolation { constraint: String },

    /// The database was unreachable or rejected the statement.
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                if let Some(constraint) = db_err.constraint().filter(|c| c.starts_with("uq_")) {
                    tracing::debug!(constraint, "Unique constraint rejected write");
                    return StoreError::UniqueViolation {
                        constraint: constraint.to_string(),
                    };
                }
            }
        }
        StoreError::Database(err)
    }
}

/// Persistence operations for cars.
#[async_trait]
pub trait CarStore: Send + Sync {
    /// All cars in insertion order.
    async fn list(&self) -> Result<Vec<Car>, StoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Car>, StoreError>;

    /// The car holding exactly this `(vin, registration_number)` pair, if any.
    async fn find_by_identity(
        &self,
        vin: &str,
        registration_number: &str,
    ) -> Result<Option<Car>, StoreError>;

    /// Persist a new car; the store assigns `id` and timestamps.
    async fn insert(&self, payload: &CarPayload) -> Result<Car, StoreError>;

    /// Replace the mutable fields of car `id`. `None` if it does not exist.
    async fn replace(&self, id: DbId, payload: &CarPayload) -> Result<Option<Car>, StoreError>;

    /// Remove car `id`. `false` if it did not exist.
    async fn delete(&self, id: DbId) -> Result<bool, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}
