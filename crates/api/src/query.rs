//! Query parameter types for the car listing endpoints.

use fleet_core::listing::CarFilters;
use serde::Deserialize;

/// `?brand=&model=&registrationNumber=&search=&page=&perPage=`
///
/// The filter fields are repeated rather than flattened from [`CarFilters`]:
/// url-encoded values reach a flattened struct as strings and the numeric
/// fields would fail to parse. Out-of-range page values are clamped by
/// `fleet_core::listing::paginate`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub registration_number: Option<String>,
    pub search: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl SearchParams {
    pub fn filters(&self) -> CarFilters {
        CarFilters {
            brand: self.brand.clone(),
            model: self.model.clone(),
            registration_number: self.registration_number.clone(),
            search: self.search.clone(),
        }
    }
}
