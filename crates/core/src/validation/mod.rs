//! Car payload validation.
//!
//! Turns an untyped JSON body into a normalized [`CarPayload`](crate::car::CarPayload)
//! or a list of field-level errors. Pure logic, no store access.

mod errors;
mod reader;
mod schema;

pub use errors::{FieldError, FieldErrors};
pub use schema::{CarSchema, Variant};
