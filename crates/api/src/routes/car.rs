use axum::routing::get;
use axum::Router;

use crate::handlers::car;
use crate::state::AppState;

/// Car routes mounted at `/cars`.
///
/// ```text
/// GET    /          -> list_cars
/// POST   /          -> create_car
/// GET    /search    -> search_cars
/// GET    /facets    -> car_facets
/// GET    /{id}      -> get_car
/// PUT    /{id}      -> update_car
/// DELETE /{id}      -> delete_car
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(car::list_cars).post(car::create_car))
        .route("/search", get(car::search_cars))
        .route("/facets", get(car::car_facets))
        .route(
            "/{id}",
            get(car::get_car)
                .put(car::update_car)
                .delete(car::delete_car),
        )
}
