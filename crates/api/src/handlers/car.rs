//! Handlers for the `/cars` resource.
//!
//! Bodies are taken as raw JSON and handed to the service, which owns
//! validation; a body that is not JSON at all is rejected by [`AppJson`].

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use fleet_core::listing::CarFilters;
use fleet_core::types::DbId;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppQuery};
use crate::query::SearchParams;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Parse the `{id}` path segment, rejecting anything that is not a positive
/// integer with the standard error body.
fn parse_id(raw: &str) -> AppResult<DbId> {
    raw.parse::<DbId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::BadRequest("Invalid ID format".to_string()))
}

/// GET /api/cars
///
/// All cars in insertion order, optionally narrowed by filter params.
pub async fn list_cars(
    State(state): State<AppState>,
    AppQuery(filters): AppQuery<CarFilters>,
) -> AppResult<impl IntoResponse> {
    let cars = state.cars.list_filtered(&filters).await?;
    Ok(Json(cars))
}

/// GET /api/cars/search
pub async fn search_cars(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let page = state
        .cars
        .search(&params.filters(), params.page, params.per_page)
        .await?;
    Ok(Json(page))
}

/// GET /api/cars/facets
///
/// Brand-keyed model and registration number lists for filter pickers.
pub async fn car_facets(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let facets = state.cars.facets().await?;
    Ok(Json(facets))
}

/// GET /api/cars/{id}
pub async fn get_car(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let car = state.cars.get(id).await?;
    Ok(Json(car))
}

/// POST /api/cars
pub async fn create_car(
    State(state): State<AppState>,
    AppJson(input): AppJson<Value>,
) -> AppResult<impl IntoResponse> {
    let car = state.cars.create(&input).await?;
    Ok((StatusCode::CREATED, Json(car)))
}

/// PUT /api/cars/{id}
///
/// Full replacement; `availability` must be sent explicitly.
pub async fn update_car(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<Value>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    let car = state.cars.update(id, &input).await?;
    Ok(Json(car))
}

/// DELETE /api/cars/{id}
pub async fn delete_car(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&id)?;
    state.cars.delete(id).await?;
    Ok(Json(MessageResponse {
        message: "Car deleted successfully",
    }))
}
