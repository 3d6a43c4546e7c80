//! Store-backed lookup for the `(vin, registration number)` rule.

use fleet_core::car::CarPayload;
use fleet_core::uniqueness::{is_conflict, CarIdentity, WriteTarget};
use fleet_db::models::car::Car;
use fleet_db::store::{CarStore, StoreError};

/// Return the stored car that blocks writing `payload` to `target`, if any.
///
/// Read-only. The lookup and the later write are not atomic; the store's
/// per-field unique constraints catch what slips between them.
pub async fn find_conflict(
    store: &dyn CarStore,
    payload: &CarPayload,
    target: WriteTarget,
) -> Result<Option<Car>, StoreError> {
    let identity = CarIdentity::of(payload);
    let matched = store
        .find_by_identity(identity.vin, identity.registration_number)
        .await?;
    Ok(matched.filter(|car| is_conflict(target, car.id)))
}
