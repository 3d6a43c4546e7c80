//! Car domain types shared by the store and the HTTP layer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Raised when a stored or submitted string is not a member of a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Fuel the car runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuelType {
    Petrol,
    Diesel,
    Electric,
    Hybrid,
}

impl FuelType {
    pub const ALL: [FuelType; 4] = [
        FuelType::Petrol,
        FuelType::Diesel,
        FuelType::Electric,
        FuelType::Hybrid,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FuelType::Petrol => "Petrol",
            FuelType::Diesel => "Diesel",
            FuelType::Electric => "Electric",
            FuelType::Hybrid => "Hybrid",
        }
    }

    /// Exact, case-sensitive lookup. No coercion of near-misses.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == value)
    }
}

impl TryFrom<String> for FuelType {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or(UnknownVariant {
            kind: "fuel type",
            value,
        })
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Gearbox type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transmission {
    Automatic,
    Manual,
}

impl Transmission {
    pub const ALL: [Transmission; 2] = [Transmission::Automatic, Transmission::Manual];

    pub fn as_str(self) -> &'static str {
        match self {
            Transmission::Automatic => "Automatic",
            Transmission::Manual => "Manual",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

impl TryFrom<String> for Transmission {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or(UnknownVariant {
            kind: "transmission",
            value,
        })
    }
}

impl fmt::Display for Transmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated, normalized car ready to be written to the store.
///
/// Only [`crate::validation::CarSchema`] produces these from untrusted input,
/// so `vin` and `registration_number` are always upper-cased and the text
/// fields are trimmed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarPayload {
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub color: String,
    pub registration_number: String,
    pub vin: String,
    pub mileage: f64,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
    pub rental_price_per_day: f64,
    pub availability: bool,
    pub location: String,
    pub image_url: Option<String>,
    pub notes: Option<String>,
}
