//! HTTP surface of the fleet inventory service.
//!
//! `main.rs` and the integration tests both build the app through
//! [`router::build_app_router`].

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod service;
pub mod state;
