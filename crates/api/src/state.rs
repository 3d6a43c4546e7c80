use std::sync::Arc;

use fleet_db::store::CarStore;

use crate::config::ServerConfig;
use crate::service::CarService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Record store (also used directly by the health check).
    pub store: Arc<dyn CarStore>,
    /// Car validation / uniqueness / persistence pipeline.
    pub cars: Arc<CarService>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn CarStore>, config: ServerConfig) -> Self {
        Self {
            cars: Arc::new(CarService::new(Arc::clone(&store))),
            store,
            config: Arc::new(config),
        }
    }

    /// Use a prebuilt service (e.g. one with a fixed schema year).
    pub fn with_service(cars: CarService, config: ServerConfig) -> Self {
        Self {
            store: Arc::clone(cars.store()),
            cars: Arc::new(cars),
            config: Arc::new(config),
        }
    }
}
