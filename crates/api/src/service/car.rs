use std::sync::Arc;

use fleet_core::error::CoreError;
use fleet_core::listing::{self, CarFilters, Facets, Page};
use fleet_core::types::DbId;
use fleet_core::uniqueness::{WriteTarget, CONFLICT_MESSAGE};
use fleet_core::validation::CarSchema;
use fleet_db::models::car::Car;
use fleet_db::store::CarStore;
use serde_json::Value;

use super::uniqueness::find_conflict;
use crate::error::AppResult;

/// Validate, check uniqueness, then persist.
///
/// Every operation either fully applies or leaves the store untouched. Store
/// failures surface as [`AppError::Store`](crate::error::AppError::Store) and
/// are never retried.
pub struct CarService {
    store: Arc<dyn CarStore>,
    /// Pinned schema; `None` means "derive the year bound from today".
    fixed_schema: Option<CarSchema>,
}

impl CarService {
    pub fn new(store: Arc<dyn CarStore>) -> Self {
        Self {
            store,
            fixed_schema: None,
        }
    }

    /// Use `schema` for every request instead of one built from the clock.
    pub fn with_schema(store: Arc<dyn CarStore>, schema: CarSchema) -> Self {
        Self {
            store,
            fixed_schema: Some(schema),
        }
    }

    pub fn store(&self) -> &Arc<dyn CarStore> {
        &self.store
    }

    fn schema(&self) -> CarSchema {
        self.fixed_schema.unwrap_or_else(CarSchema::for_today)
    }

    pub async fn create(&self, input: &Value) -> AppResult<Car> {
        let payload = self
            .schema()
            .validate_create(input)
            .map_err(CoreError::Validation)?;

        if let Some(existing) = find_conflict(self.store.as_ref(), &payload, WriteTarget::New).await? {
            tracing::warn!(
                existing_id = existing.id,
                vin = %payload.vin,
                registration_number = %payload.registration_number,
                "Rejected duplicate car",
            );
            return Err(CoreError::Conflict(CONFLICT_MESSAGE.to_string()).into());
        }

        let car = self.store.insert(&payload).await?;

        tracing::info!(
            car_id = car.id,
            vin = %car.vin,
            registration_number = %car.registration_number,
            "Car created",
        );

        Ok(car)
    }

    /// Full replacement of car `id`.
    ///
    /// The uniqueness check runs before the existence check, so a payload
    /// that collides with another car reports a conflict even when `id`
    /// is unknown.
    pub async fn update(&self, id: DbId, input: &Value) -> AppResult<Car> {
        let payload = self
            .schema()
            .validate_update(input)
            .map_err(CoreError::Validation)?;

        if let Some(existing) =
            find_conflict(self.store.as_ref(), &payload, WriteTarget::Existing(id)).await?
        {
            tracing::warn!(
                car_id = id,
                existing_id = existing.id,
                vin = %payload.vin,
                registration_number = %payload.registration_number,
                "Rejected update colliding with another car",
            );
            return Err(CoreError::Conflict(CONFLICT_MESSAGE.to_string()).into());
        }

        let car = self
            .store
            .replace(id, &payload)
            .await?
            .ok_or(CoreError::NotFound { entity: "Car", id })?;

        tracing::info!(
            car_id = car.id,
            vin = %car.vin,
            registration_number = %car.registration_number,
            "Car updated",
        );

        Ok(car)
    }

    pub async fn get(&self, id: DbId) -> AppResult<Car> {
        let car = self
            .store
            .find_by_id(id)
            .await?
            .ok_or(CoreError::NotFound { entity: "Car", id })?;
        Ok(car)
    }

    /// Every car in insertion order.
    pub async fn list(&self) -> AppResult<Vec<Car>> {
        let cars = self.store.list().await?;
        tracing::debug!(count = cars.len(), "Listed cars");
        Ok(cars)
    }

    /// Cars matching `filters`, in insertion order.
    pub async fn list_filtered(&self, filters: &CarFilters) -> AppResult<Vec<Car>> {
        let cars = self.list().await?;
        if filters.is_empty() {
            return Ok(cars);
        }
        Ok(listing::filter_cars(&cars, filters)
            .into_iter()
            .cloned()
            .collect())
    }

    /// One page of the cars matching `filters`.
    pub async fn search(
        &self,
        filters: &CarFilters,
        page: Option<usize>,
        per_page: Option<usize>,
    ) -> AppResult<Page<Car>> {
        let matched = self.list_filtered(filters).await?;
        let page = listing::paginate(matched, page, per_page);

        tracing::debug!(
            page = page.page,
            per_page = page.per_page,
            total = page.total,
            "Searched cars",
        );

        Ok(page)
    }

    pub async fn facets(&self) -> AppResult<Facets> {
        let cars = self.list().await?;
        Ok(listing::facets(&cars))
    }

    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        if !self.store.delete(id).await? {
            return Err(CoreError::NotFound { entity: "Car", id }.into());
        }
        tracing::info!(car_id = id, "Car deleted");
        Ok(())
    }
}
