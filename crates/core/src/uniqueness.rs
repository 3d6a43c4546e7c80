//! The `(vin, registration number)` uniqueness rule.
//!
//! The store lookup lives with the service; this module only decides whether
//! a matching record counts as a conflict for a given write.

use crate::car::CarPayload;
use crate::types::DbId;

/// Message returned to clients when the identifier pair is taken.
pub const CONFLICT_MESSAGE: &str = "A car with this VIN and registration number already exists";

/// The record a write is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteTarget {
    /// A create: no record exists yet.
    New,
    /// An update of the record with this id.
    Existing(DbId),
}

/// The normalized identity pair of a car.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarIdentity<'a> {
    pub vin: &'a str,
    pub registration_number: &'a str,
}

impl<'a> CarIdentity<'a> {
    pub fn of(payload: &'a CarPayload) -> Self {
        Self {
            vin: &payload.vin,
            registration_number: &payload.registration_number,
        }
    }
}

/// Whether a stored record with id `matched` and the same identity pair
/// blocks a write to `target`.
///
/// Creates always conflict. Updates conflict only with a different record,
/// so a car can be saved with its own unchanged identifiers.
pub fn is_conflict(target: WriteTarget, matched: DbId) -> bool {
    match target {
        WriteTarget::New => true,
        WriteTarget::Existing(id) => id != matched,
    }
}
