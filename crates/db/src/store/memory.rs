use async_trait::async_trait;
use chrono::Utc;
use fleet_core::car::CarPayload;
use fleet_core::types::DbId;
use tokio::sync::RwLock;

use super::{CarStore, StoreError, REGISTRATION_CONSTRAINT, VIN_CONSTRAINT};
use crate::models::car::Car;

/// Process-local [`CarStore`] for development and tests.
///
/// Mirrors the PostgreSQL store: ids start at 1 and increase, rows keep
/// insertion order, and `vin` / `registration_number` are each unique.
/// The lock is held only inside a single call.
#[derive(Debug, Default)]
pub struct MemoryCarStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    last_id: DbId,
    cars: Vec<Car>,
}

impl Inner {
    /// Reject a payload whose `vin` or registration number is held by a car
    /// other than `except`.
    fn check_unique(&self, payload: &CarPayload, except: Option<DbId>) -> Result<(), StoreError> {
        let others = self.cars.iter().filter(|c| Some(c.id) != except);
        for car in others {
            let constraint = if car.vin == payload.vin {
                VIN_CONSTRAINT
            } else if car.registration_number == payload.registration_number {
                REGISTRATION_CONSTRAINT
            } else {
                continue;
            };
            return Err(StoreError::UniqueViolation {
                constraint: constraint.to_string(),
            });
        }
        Ok(())
    }
}

impl MemoryCarStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CarStore for MemoryCarStore {
    async fn list(&self) -> Result<Vec<Car>, StoreError> {
        Ok(self.inner.read().await.cars.clone())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Car>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.cars.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_identity(
        &self,
        vin: &str,
        registration_number: &str,
    ) -> Result<Option<Car>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .cars
            .iter()
            .find(|c| c.vin == vin && c.registration_number == registration_number)
            .cloned())
    }

    async fn insert(&self, payload: &CarPayload) -> Result<Car, StoreError> {
        let mut inner = self.inner.write().await;
        inner.check_unique(payload, None)?;

        inner.last_id += 1;
        let car = Car::from_payload(inner.last_id, payload, Utc::now());
        inner.cars.push(car.clone());
        Ok(car)
    }

    async fn replace(&self, id: DbId, payload: &CarPayload) -> Result<Option<Car>, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(index) = inner.cars.iter().position(|c| c.id == id) else {
            return Ok(None);
        };
        inner.check_unique(payload, Some(id))?;

        let created_at = inner.cars[index].created_at;
        let mut car = Car::from_payload(id, payload, created_at);
        car.updated_at = Utc::now();
        inner.cars[index] = car.clone();
        Ok(Some(car))
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.cars.len();
        inner.cars.retain(|c| c.id != id);
        Ok(inner.cars.len() < before)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use fleet_core::car::{FuelType, Transmission};

    use super::*;

    fn payload(vin: &str, reg: &str) -> CarPayload {
        CarPayload {
            brand: "Honda".into(),
            model: "Civic".into(),
            year: 2019,
            color: "Black".into(),
            registration_number: reg.into(),
            vin: vin.into(),
            mileage: 30000.0,
            fuel_type: FuelType::Diesel,
            transmission: Transmission::Manual,
            rental_price_per_day: 45.0,
            availability: true,
            location: "Chiang Mai".into(),
            image_url: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids_and_keeps_order() {
        let store = MemoryCarStore::new();
        let a = store.insert(&payload("AAAAAAAAAAAAAAAAA", "A1")).await.unwrap();
        let b = store.insert(&payload("BBBBBBBBBBBBBBBBB", "B1")).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));
        assert_eq!(a.created_at, a.updated_at);

        let ids: Vec<DbId> = store.list().await.unwrap().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_vin_or_registration() {
        let store = MemoryCarStore::new();
        store.insert(&payload("AAAAAAAAAAAAAAAAA", "A1")).await.unwrap();

        let err = store
            .insert(&payload("AAAAAAAAAAAAAAAAA", "Z9"))
            .await
            .unwrap_err();
        assert_matches!(err, StoreError::UniqueViolation { constraint } if constraint == VIN_CONSTRAINT);

        let err = store
            .insert(&payload("ZZZZZZZZZZZZZZZZZ", "A1"))
            .await
            .unwrap_err();
        assert_matches!(err, StoreError::UniqueViolation { constraint } if constraint == REGISTRATION_CONSTRAINT);

        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn find_by_identity_needs_both_fields() {
        let store = MemoryCarStore::new();
        store.insert(&payload("AAAAAAAAAAAAAAAAA", "A1")).await.unwrap();

        assert!(store
            .find_by_identity("AAAAAAAAAAAAAAAAA", "A1")
            .await
            .unwrap()
            .is_some());
        assert!(store
            .find_by_identity("AAAAAAAAAAAAAAAAA", "B1")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn replace_keeps_id_and_created_at() {
        let store = MemoryCarStore::new();
        let original = store.insert(&payload("AAAAAAAAAAAAAAAAA", "A1")).await.unwrap();

        let mut changed = payload("AAAAAAAAAAAAAAAAA", "A1");
        changed.color = "Red".into();
        let updated = store.replace(original.id, &changed).await.unwrap().unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.color, "Red");
        assert!(updated.updated_at >= original.updated_at);
    }

    #[tokio::test]
    async fn replace_missing_car_returns_none() {
        let store = MemoryCarStore::new();
        let result = store
            .replace(42, &payload("AAAAAAAAAAAAAAAAA", "A1"))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn replace_rejects_identifier_held_by_another_car() {
        let store = MemoryCarStore::new();
        store.insert(&payload("AAAAAAAAAAAAAAAAA", "A1")).await.unwrap();
        let b = store.insert(&payload("BBBBBBBBBBBBBBBBB", "B1")).await.unwrap();

        let err = store
            .replace(b.id, &payload("AAAAAAAAAAAAAAAAA", "B1"))
            .await
            .unwrap_err();
        assert_matches!(err, StoreError::UniqueViolation { .. });
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_was_removed() {
        let store = MemoryCarStore::new();
        let car = store.insert(&payload("AAAAAAAAAAAAAAAAA", "A1")).await.unwrap();

        assert!(store.delete(car.id).await.unwrap());
        assert!(!store.delete(car.id).await.unwrap());
        assert!(store.find_by_id(car.id).await.unwrap().is_none());
    }
}
