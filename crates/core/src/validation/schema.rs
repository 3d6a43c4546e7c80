//! The car schema: normalization plus field rules for create and update bodies.

use chrono::Datelike;
use serde_json::Value;
use validator::Validate;

use super::errors::{FieldError, FieldErrors};
use super::reader::{json_type, FieldReader};
use crate::car::{CarPayload, FuelType, Transmission};

/// Wire field names in the order errors are reported.
const FIELD_ORDER: [&str; 14] = [
    "brand",
    "model",
    "year",
    "color",
    "registrationNumber",
    "vin",
    "mileage",
    "fuelType",
    "transmission",
    "rentalPricePerDay",
    "availability",
    "location",
    "imageUrl",
    "notes",
];

/// Which write path a body is validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// All mandatory fields required; `availability` defaults to `true` when absent.
    Create,
    /// Full replacement: every mandatory field including `availability` must be resent.
    Update,
}

/// Static rules checked after the fields have been extracted and normalized.
///
/// The upper `year` bound depends on the clock, so [`CarSchema`] checks it.
#[derive(Debug, Validate)]
struct CarRules {
    #[validate(length(min = 1, message = "Brand is required"))]
    brand: String,
    #[validate(length(min = 1, message = "Model is required"))]
    model: String,
    #[validate(range(min = 1900, message = "Year must be after 1900"))]
    year: i64,
    #[validate(length(min = 1, message = "Color is required"))]
    color: String,
    #[validate(length(min = 1, message = "Registration number is required"))]
    registration_number: String,
    #[validate(length(equal = 17, message = "VIN must be exactly 17 characters"))]
    vin: String,
    #[validate(range(min = 0.0, message = "Mileage must be positive"))]
    mileage: f64,
    #[validate(range(min = 0.0, message = "Rental price must be positive"))]
    rental_price_per_day: f64,
    #[validate(length(min = 1, message = "Location is required"))]
    location: String,
}

/// Validates raw car bodies against a fixed "current year".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarSchema {
    current_year: i32,
}

impl CarSchema {
    pub fn new(current_year: i32) -> Self {
        Self { current_year }
    }

    /// Schema anchored to the current UTC calendar year.
    pub fn for_today() -> Self {
        Self::new(chrono::Utc::now().year())
    }

    /// Newest model year accepted (next year's models are already on sale).
    pub fn max_year(&self) -> i64 {
        i64::from(self.current_year) + 1
    }

    pub fn validate_create(&self, input: &Value) -> Result<CarPayload, FieldErrors> {
        self.validate(input, Variant::Create)
    }

    pub fn validate_update(&self, input: &Value) -> Result<CarPayload, FieldErrors> {
        self.validate(input, Variant::Update)
    }

    /// Normalize and validate `input`.
    ///
    /// Either every field passes and a [`CarPayload`] is returned, or all
    /// failures are returned together in schema field order.
    pub fn validate(&self, input: &Value, variant: Variant) -> Result<CarPayload, FieldErrors> {
        let Some(object) = input.as_object() else {
            return Err(FieldErrors::single(
                "",
                format!("Expected object, received {}", json_type(input)),
            ));
        };

        let mut reader = FieldReader::new(object);

        let brand = reader.required_string("brand").map(str::trim);
        let model = reader.required_string("model").map(str::trim);
        let year = reader.integer("year");
        let color = reader.required_string("color").map(str::trim);
        let registration_number = reader
            .required_string("registrationNumber")
            .map(|r| r.trim().to_uppercase());
        // Length is checked before upper-casing.
        let vin = reader.required_string("vin").map(str::trim);
        let mileage = reader.number("mileage");
        let fuel_type = reader.one_of(
            "fuelType",
            &FuelType::ALL.map(FuelType::as_str),
            FuelType::parse,
        );
        let transmission = reader.one_of(
            "transmission",
            &Transmission::ALL.map(Transmission::as_str),
            Transmission::parse,
        );
        let rental_price_per_day = reader.number("rentalPricePerDay");
        let availability_default = match variant {
            Variant::Create => Some(true),
            Variant::Update => None,
        };
        let availability = reader.boolean("availability", availability_default);
        let location = reader.required_string("location").map(str::trim);
        let image_url = reader.optional_string("imageUrl");
        let notes = reader.optional_string("notes");

        let rules = CarRules {
            brand: brand.unwrap_or_default().to_string(),
            model: model.unwrap_or_default().to_string(),
            year: year.unwrap_or(i64::from(self.current_year)),
            color: color.unwrap_or_default().to_string(),
            registration_number: registration_number.clone().unwrap_or_default(),
            vin: vin.unwrap_or_default().to_string(),
            mileage: mileage.unwrap_or_default(),
            rental_price_per_day: rental_price_per_day.unwrap_or_default(),
            location: location.unwrap_or_default().to_string(),
        };

        if let Err(rule_errors) = rules.validate() {
            for (field, field_errors) in rule_errors.field_errors() {
                let path = wire_name(&field);
                // A type error already covers this field.
                if reader.has_error(path) {
                    continue;
                }
                for error in field_errors {
                    let message = error
                        .message
                        .as_deref()
                        .map(str::to_string)
                        .unwrap_or_else(|| error.code.to_string());
                    reader.push(path, message);
                }
            }
        }

        // Upper-casing must not change the length checked above.
        if let Some(v) = vin {
            if !reader.has_error("vin") && !v.chars().all(|c| c.is_ascii_alphanumeric()) {
                reader.push("vin", "VIN must contain only letters and digits");
            }
        }

        if let Some(y) = year {
            if y > self.max_year() {
                reader.push("year", "Year is too far in the future");
            }
        }

        let errors = reader.into_errors();

        let (
            Some(brand),
            Some(model),
            Some(year),
            Some(color),
            Some(registration_number),
            Some(vin),
            Some(mileage),
            Some(fuel_type),
            Some(transmission),
            Some(rental_price_per_day),
            Some(availability),
            Some(location),
        ) = (
            brand,
            model,
            year,
            color,
            registration_number,
            vin,
            mileage,
            fuel_type,
            transmission,
            rental_price_per_day,
            availability,
            location,
        )
        else {
            return Err(ordered(errors));
        };

        if !errors.is_empty() {
            return Err(ordered(errors));
        }

        // Bounds checked above, so the year fits.
        let year = i32::try_from(year)
            .map_err(|_| FieldErrors::single("year", "Year is too far in the future"))?;

        Ok(CarPayload {
            brand: brand.to_string(),
            model: model.to_string(),
            year,
            color: color.to_string(),
            registration_number,
            vin: vin.to_uppercase(),
            mileage,
            fuel_type,
            transmission,
            rental_price_per_day,
            availability,
            location: location.to_string(),
            image_url: image_url.map(str::to_string),
            notes: notes.map(str::to_string),
        })
    }
}

fn wire_name(field: &str) -> &str {
    match field {
        "registration_number" => "registrationNumber",
        "rental_price_per_day" => "rentalPricePerDay",
        other => other,
    }
}

fn ordered(mut errors: Vec<FieldError>) -> FieldErrors {
    errors.sort_by_key(|e| {
        FIELD_ORDER
            .iter()
            .position(|f| *f == e.path)
            .unwrap_or(FIELD_ORDER.len())
    });
    FieldErrors::new(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    const YEAR: i32 = 2025;

    fn schema() -> CarSchema {
        CarSchema::new(YEAR)
    }

    fn corolla() -> Value {
        json!({
            "brand": "Toyota",
            "model": "Corolla",
            "year": 2020,
            "color": "White",
            "registrationNumber": "abc123",
            "vin": "1HGCM82633A004352",
            "mileage": 20000,
            "fuelType": "Petrol",
            "transmission": "Automatic",
            "rentalPricePerDay": 50,
            "location": "Bangkok"
        })
    }

    fn with(field: &str, value: Value) -> Value {
        let mut body = corolla();
        body[field] = value;
        body
    }

    fn without(field: &str) -> Value {
        let mut body = corolla();
        body.as_object_mut().unwrap().remove(field);
        body
    }

    #[test]
    fn valid_create_body_is_normalized() {
        let car = schema().validate_create(&corolla()).unwrap();
        assert_eq!(car.registration_number, "ABC123");
        assert_eq!(car.vin, "1HGCM82633A004352");
        assert!(car.availability);
        assert_eq!(car.fuel_type, FuelType::Petrol);
        assert_eq!(car.transmission, Transmission::Automatic);
        assert_eq!(car.image_url, None);
        assert_eq!(car.notes, None);
    }

    #[test]
    fn vin_is_upper_cased() {
        let car = schema()
            .validate_create(&with("vin", json!("1hgcm82633a004352")))
            .unwrap();
        assert_eq!(car.vin, "1HGCM82633A004352");
    }

    #[test]
    fn registration_number_is_trimmed_and_upper_cased() {
        let car = schema()
            .validate_create(&with("registrationNumber", json!("  kk-1234 ")))
            .unwrap();
        assert_eq!(car.registration_number, "KK-1234");
    }

    #[test]
    fn every_required_field_is_reported_when_missing() {
        let required = [
            "brand",
            "model",
            "year",
            "color",
            "registrationNumber",
            "vin",
            "mileage",
            "fuelType",
            "transmission",
            "rentalPricePerDay",
            "location",
        ];
        for field in required {
            let errors = schema().validate_create(&without(field)).unwrap_err();
            assert_eq!(errors.len(), 1, "{field}: {errors}");
            assert_eq!(errors.messages_for(field), vec!["Required"], "{field}");
        }
    }

    #[test]
    fn vin_must_be_exactly_seventeen_characters() {
        for vin in ["1HGCM82633A00435", "1HGCM82633A0043521", ""] {
            let errors = schema()
                .validate_create(&with("vin", json!(vin)))
                .unwrap_err();
            assert_eq!(
                errors.messages_for("vin"),
                vec!["VIN must be exactly 17 characters"]
            );
        }
    }

    #[test]
    fn vin_is_trimmed_before_the_length_check() {
        let car = schema()
            .validate_create(&with("vin", json!(" 1hgcm82633a004352 ")))
            .unwrap();
        assert_eq!(car.vin, "1HGCM82633A004352");

        let errors = schema()
            .validate_create(&with("vin", json!(" 1HGCM82633A00435")))
            .unwrap_err();
        assert_eq!(
            errors.messages_for("vin"),
            vec!["VIN must be exactly 17 characters"]
        );
    }

    #[test]
    fn non_ascii_vin_is_rejected() {
        // 17 characters, but "ß" upper-cases to "SS".
        let errors = schema()
            .validate_create(&with("vin", json!("ßhgcm82633a004352")))
            .unwrap_err();
        assert_eq!(
            errors.messages_for("vin"),
            vec!["VIN must contain only letters and digits"]
        );
    }

    #[test]
    fn whole_float_year_is_accepted() {
        let car = schema()
            .validate_create(&with("year", json!(2020.0)))
            .unwrap();
        assert_eq!(car.year, 2020);
    }

    #[test]
    fn year_beyond_i64_is_a_range_error() {
        let errors = schema()
            .validate_create(&with("year", json!(u64::MAX)))
            .unwrap_err();
        assert_eq!(
            errors.messages_for("year"),
            vec!["Year is too far in the future"]
        );

        let errors = schema()
            .validate_create(&with("year", json!(-1e20)))
            .unwrap_err();
        assert_eq!(errors.messages_for("year"), vec!["Year must be after 1900"]);
    }

    #[test]
    fn year_upper_bound_is_next_year() {
        assert!(schema()
            .validate_create(&with("year", json!(YEAR + 1)))
            .is_ok());

        let errors = schema()
            .validate_create(&with("year", json!(YEAR + 2)))
            .unwrap_err();
        assert_eq!(
            errors.messages_for("year"),
            vec!["Year is too far in the future"]
        );
    }

    #[test]
    fn year_lower_bound_is_1900() {
        assert!(schema().validate_create(&with("year", json!(1900))).is_ok());

        let errors = schema()
            .validate_create(&with("year", json!(1899)))
            .unwrap_err();
        assert_eq!(errors.messages_for("year"), vec!["Year must be after 1900"]);
    }

    #[test]
    fn fractional_year_is_rejected() {
        let errors = schema()
            .validate_create(&with("year", json!(2020.5)))
            .unwrap_err();
        assert_eq!(
            errors.messages_for("year"),
            vec!["Expected integer, received float"]
        );
    }

    #[test]
    fn mileage_zero_is_accepted_negative_is_not() {
        let car = schema().validate_create(&with("mileage", json!(0))).unwrap();
        assert_eq!(car.mileage, 0.0);

        let errors = schema()
            .validate_create(&with("mileage", json!(-1)))
            .unwrap_err();
        assert_eq!(errors.messages_for("mileage"), vec!["Mileage must be positive"]);
    }

    #[test]
    fn negative_rental_price_is_rejected() {
        let errors = schema()
            .validate_create(&with("rentalPricePerDay", json!(-0.5)))
            .unwrap_err();
        assert_eq!(
            errors.messages_for("rentalPricePerDay"),
            vec!["Rental price must be positive"]
        );
    }

    #[test]
    fn fuel_type_outside_the_enumeration_is_rejected() {
        let errors = schema()
            .validate_create(&with("fuelType", json!("Gasoline")))
            .unwrap_err();
        assert_eq!(
            errors.messages_for("fuelType"),
            vec!["Invalid enum value. Expected 'Petrol' | 'Diesel' | 'Electric' | 'Hybrid', received 'Gasoline'"]
        );
    }

    #[test]
    fn transmission_is_case_sensitive() {
        let errors = schema()
            .validate_create(&with("transmission", json!("manual")))
            .unwrap_err();
        assert!(errors.contains("transmission"));
    }

    #[test]
    fn wrong_types_are_reported_without_rule_errors() {
        let errors = schema()
            .validate_create(&with("brand", json!(42)))
            .unwrap_err();
        assert_eq!(
            errors.messages_for("brand"),
            vec!["Expected string, received number"]
        );

        let errors = schema()
            .validate_create(&with("mileage", json!("20000")))
            .unwrap_err();
        assert_eq!(
            errors.messages_for("mileage"),
            vec!["Expected number, received string"]
        );
    }

    #[test]
    fn blank_text_fields_are_rejected() {
        let errors = schema()
            .validate_create(&with("location", json!("   ")))
            .unwrap_err();
        assert_eq!(errors.messages_for("location"), vec!["Location is required"]);
    }

    #[test]
    fn availability_defaults_only_on_create_when_absent() {
        let car = schema().validate_create(&corolla()).unwrap();
        assert!(car.availability);

        let car = schema()
            .validate_create(&with("availability", json!(false)))
            .unwrap();
        assert!(!car.availability);

        let errors = schema()
            .validate_create(&with("availability", Value::Null))
            .unwrap_err();
        assert_eq!(
            errors.messages_for("availability"),
            vec!["Expected boolean, received null"]
        );
    }

    #[test]
    fn update_requires_availability() {
        let errors = schema().validate_update(&corolla()).unwrap_err();
        assert_eq!(errors.messages_for("availability"), vec!["Required"]);

        let car = schema()
            .validate_update(&with("availability", json!(false)))
            .unwrap();
        assert!(!car.availability);
    }

    #[test]
    fn optional_text_accepts_null_and_rejects_other_types() {
        let car = schema()
            .validate_create(&with("notes", Value::Null))
            .unwrap();
        assert_eq!(car.notes, None);

        let car = schema()
            .validate_create(&with("imageUrl", json!("https://example.com/a.jpg")))
            .unwrap();
        assert_eq!(car.image_url.as_deref(), Some("https://example.com/a.jpg"));

        let errors = schema()
            .validate_create(&with("notes", json!(["a"])))
            .unwrap_err();
        assert_eq!(errors.messages_for("notes"), vec!["Expected string, received array"]);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut body = corolla();
        body["id"] = json!(99);
        body["_id"] = json!("64f0c0ffee");
        body["createdAt"] = json!("2024-01-01T00:00:00Z");
        assert!(schema().validate_create(&body).is_ok());
    }

    #[test]
    fn errors_are_reported_together_in_field_order() {
        let body = json!({
            "location": "",
            "vin": "short",
            "brand": "",
            "fuelType": "Steam",
        });
        let errors = schema().validate_create(&body).unwrap_err();
        let paths: Vec<&str> = errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "brand",
                "model",
                "year",
                "color",
                "registrationNumber",
                "vin",
                "mileage",
                "fuelType",
                "transmission",
                "rentalPricePerDay",
                "location",
            ]
        );
    }

    #[test]
    fn non_object_body_is_rejected() {
        let errors = schema().validate_create(&json!([1, 2])).unwrap_err();
        assert_matches!(
            errors.iter().next(),
            Some(FieldError { path, message }) if path.is_empty() && message == "Expected object, received array"
        );
    }
}
