//! Fleet inventory domain logic.
//!
//! Everything in this crate is pure: car payload validation, the uniqueness
//! decision rule, and the listing query (filter / search / paginate). Storage
//! and HTTP live in `fleet-db` and `fleet-api`.

pub mod car;
pub mod error;
pub mod listing;
pub mod types;
pub mod uniqueness;
pub mod validation;
