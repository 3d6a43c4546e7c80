pub mod car;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /cars                  list (filterable), create
/// /cars/search           filtered, paginated list
/// /cars/facets           brand -> models / registration numbers
/// /cars/{id}             get, replace, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/cars", car::router())
}
