//! Repository for the `cars` table.

use fleet_core::car::CarPayload;
use fleet_core::types::DbId;
use sqlx::PgPool;

use crate::models::car::Car;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, brand, model, year, color, registration_number, vin, mileage, \
    fuel_type, transmission, rental_price_per_day, availability, location, image_url, notes, \
    created_at, updated_at";

/// Provides CRUD operations for cars.
pub struct CarRepo;

impl CarRepo {
    /// Insert a new car, returning the created row.
    pub async fn create(pool: &PgPool, input: &CarPayload) -> Result<Car, sqlx::Error> {
        let query = format!(
            "INSERT INTO cars (brand, model, year, color, registration_number, vin, mileage, \
                fuel_type, transmission, rental_price_per_day, availability, location, \
                image_url, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Car>(&query)
            .bind(&input.brand)
            .bind(&input.model)
            .bind(input.year)
            .bind(&input.color)
            .bind(&input.registration_number)
            .bind(&input.vin)
            .bind(input.mileage)
            .bind(input.fuel_type.as_str())
            .bind(input.transmission.as_str())
            .bind(input.rental_price_per_day)
            .bind(input.availability)
            .bind(&input.location)
            .bind(&input.image_url)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a car by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Car>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cars WHERE id = $1");
        sqlx::query_as::<_, Car>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the car holding exactly this `(vin, registration_number)` pair.
    ///
    /// Both values are compared as stored, so callers pass normalized forms.
    pub async fn find_by_identity(
        pool: &PgPool,
        vin: &str,
        registration_number: &str,
    ) -> Result<Option<Car>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cars \
             WHERE vin = $1 AND registration_number = $2 \
             ORDER BY id \
             LIMIT 1"
        );
        sqlx::query_as::<_, Car>(&query)
            .bind(vin)
            .bind(registration_number)
            .fetch_optional(pool)
            .await
    }

    /// List all cars in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Car>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cars ORDER BY id");
        sqlx::query_as::<_, Car>(&query).fetch_all(pool).await
    }

    /// Replace every mutable field of a car. `id` and `created_at` are kept;
    /// `updated_at` is refreshed by trigger.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &CarPayload,
    ) -> Result<Option<Car>, sqlx::Error> {
        let query = format!(
            "UPDATE cars SET \
                brand = $2, \
                model = $3, \
                year = $4, \
                color = $5, \
                registration_number = $6, \
                vin = $7, \
                mileage = $8, \
                fuel_type = $9, \
                transmission = $10, \
                rental_price_per_day = $11, \
                availability = $12, \
                location = $13, \
                image_url = $14, \
                notes = $15 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Car>(&query)
            .bind(id)
            .bind(&input.brand)
            .bind(&input.model)
            .bind(input.year)
            .bind(&input.color)
            .bind(&input.registration_number)
            .bind(&input.vin)
            .bind(input.mileage)
            .bind(input.fuel_type.as_str())
            .bind(input.transmission.as_str())
            .bind(input.rental_price_per_day)
            .bind(input.availability)
            .bind(&input.location)
            .bind(&input.image_url)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete a car. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
