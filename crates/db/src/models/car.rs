//! Car entity model.
//!
//! Writes go through [`CarPayload`](fleet_core::car::CarPayload), which only
//! the validation schema produces, so there is no separate create/update DTO.

use fleet_core::car::{CarPayload, FuelType, Transmission};
use fleet_core::listing::CarListing;
use fleet_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `cars` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: DbId,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub registration_number: String,
    pub vin: String,
    pub mileage: f64,
    #[sqlx(try_from = "String")]
    pub fuel_type: FuelType,
    #[sqlx(try_from = "String")]
    pub transmission: Transmission,
    pub rental_price_per_day: f64,
    pub availability: bool,
    pub location: String,
    pub image_url: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Car {
    /// Build a record from a validated payload. Used by stores that assign
    /// ids and timestamps themselves.
    pub fn from_payload(id: DbId, payload: &CarPayload, created_at: Timestamp) -> Self {
        Self {
            id,
            brand: payload.brand.clone(),
            model: payload.model.clone(),
            year: payload.year,
            color: payload.color.clone(),
            registration_number: payload.registration_number.clone(),
            vin: payload.vin.clone(),
            mileage: payload.mileage,
            fuel_type: payload.fuel_type,
            transmission: payload.transmission,
            rental_price_per_day: payload.rental_price_per_day,
            availability: payload.availability,
            location: payload.location.clone(),
            image_url: payload.image_url.clone(),
            notes: payload.notes.clone(),
            created_at,
            updated_at: created_at,
        }
    }

    /// The mutable fields as a payload, i.e. what a full replace would resend.
    pub fn to_payload(&self) -> CarPayload {
        CarPayload {
            brand: self.brand.clone(),
            model: self.model.clone(),
            year: self.year,
            color: self.color.clone(),
            registration_number: self.registration_number.clone(),
            vin: self.vin.clone(),
            mileage: self.mileage,
            fuel_type: self.fuel_type,
            transmission: self.transmission,
            rental_price_per_day: self.rental_price_per_day,
            availability: self.availability,
            location: self.location.clone(),
            image_url: self.image_url.clone(),
            notes: self.notes.clone(),
        }
    }
}

impl CarListing for Car {
    fn brand(&self) -> &str {
        &self.brand
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn registration_number(&self) -> &str {
        &self.registration_number
    }

    fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}
