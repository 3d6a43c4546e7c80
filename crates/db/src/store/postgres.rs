use async_trait::async_trait;
use fleet_core::car::CarPayload;
use fleet_core::types::DbId;

use super::{CarStore, StoreError};
use crate::models::car::Car;
use crate::repositories::CarRepo;
use crate::DbPool;

/// [`CarStore`] backed by the `cars` table.
#[derive(Debug, Clone)]
pub struct PgCarStore {
    pool: DbPool,
}

impl PgCarStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CarStore for PgCarStore {
    async fn list(&self) -> Result<Vec<Car>, StoreError> {
        Ok(CarRepo::list(&self.pool).await?)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Car>, StoreError> {
        Ok(CarRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_by_identity(
        &self,
        vin: &str,
        registration_number: &str,
    ) -> Result<Option<Car>, StoreError> {
        Ok(CarRepo::find_by_identity(&self.pool, vin, registration_number).await?)
    }

    async fn insert(&self, payload: &CarPayload) -> Result<Car, StoreError> {
        Ok(CarRepo::create(&self.pool, payload).await?)
    }

    async fn replace(&self, id: DbId, payload: &CarPayload) -> Result<Option<Car>, StoreError> {
        Ok(CarRepo::replace(&self.pool, id, payload).await?)
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(CarRepo::delete(&self.pool, id).await?)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
