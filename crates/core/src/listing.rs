//! Listing queries over an already-fetched set of cars.
//!
//! `filter_cars` is a plain function of `(all records, filters)` with no
//! hidden state; pagination and facet derivation sit on top of it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Cars shown per page when the client does not ask for a size.
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// Upper bound for a client-requested page size.
pub const MAX_PAGE_SIZE: usize = 100;

/// Read access to the fields the listing queries look at.
pub trait CarListing {
    fn brand(&self) -> &str;
    fn model(&self) -> &str;
    fn registration_number(&self) -> &str;
    fn notes(&self) -> Option<&str>;
}

/// Optional listing filters. Blank values are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarFilters {
    /// Exact brand match.
    pub brand: Option<String>,
    /// Exact model match.
    pub model: Option<String>,
    /// Case-insensitive substring of the registration number.
    pub registration_number: Option<String>,
    /// Case-insensitive free text over brand, model, registration number and notes.
    pub search: Option<String>,
}

impl CarFilters {
    pub fn is_empty(&self) -> bool {
        [
            &self.brand,
            &self.model,
            &self.registration_number,
            &self.search,
        ]
        .into_iter()
        .all(|f| active(f).is_none())
    }
}

/// One page of results plus the totals a pager needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// Brand-keyed option lists for cascading filter pickers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Facets {
    pub models_by_brand: BTreeMap<String, Vec<String>>,
    pub registrations_by_brand: BTreeMap<String, Vec<String>>,
}

/// Apply `filters` to `cars`, keeping the input order.
pub fn filter_cars<'a, T: CarListing>(cars: &'a [T], filters: &CarFilters) -> Vec<&'a T> {
    let brand = active(&filters.brand);
    let model = active(&filters.model);
    let registration = active(&filters.registration_number).map(str::to_lowercase);
    let search = active(&filters.search).map(str::to_lowercase);

    cars.iter()
        .filter(|car| brand.map_or(true, |b| b == car.brand()))
        .filter(|car| model.map_or(true, |m| m == car.model()))
        .filter(|car| match &registration {
            Some(needle) => car.registration_number().to_lowercase().contains(needle),
            None => true,
        })
        .filter(|car| match &search {
            Some(needle) => haystack(*car).contains(needle),
            None => true,
        })
        .collect()
}

/// Slice `items` into a 1-based page.
///
/// `page` below 1 is treated as 1 and `per_page` is clamped to
/// `1..=MAX_PAGE_SIZE`. A page past the end has no data but still reports
/// the totals.
pub fn paginate<T>(items: Vec<T>, page: Option<usize>, per_page: Option<usize>) -> Page<T> {
    let per_page = per_page
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let page = page.unwrap_or(1).max(1);
    let total = items.len();
    let total_pages = total.div_ceil(per_page);

    let data = items
        .into_iter()
        .skip((page - 1).saturating_mul(per_page))
        .take(per_page)
        .collect();

    Page {
        data,
        page,
        per_page,
        total,
        total_pages,
    }
}

/// Distinct models and registration numbers per brand, in first-seen order.
pub fn facets<T: CarListing>(cars: &[T]) -> Facets {
    let mut facets = Facets::default();
    for car in cars {
        push_distinct(
            facets.models_by_brand.entry(car.brand().to_string()).or_default(),
            car.model(),
        );
        push_distinct(
            facets
                .registrations_by_brand
                .entry(car.brand().to_string())
                .or_default(),
            car.registration_number(),
        );
    }
    facets
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn haystack<T: CarListing>(car: &T) -> String {
    format!(
        "{} {} {} {}",
        car.brand(),
        car.model(),
        car.registration_number(),
        car.notes().unwrap_or_default()
    )
    .to_lowercase()
}

fn push_distinct(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}
