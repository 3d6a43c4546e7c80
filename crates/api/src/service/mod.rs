//! Car service: validation, uniqueness, and persistence in one pipeline.

mod car;
pub mod uniqueness;

pub use car::CarService;
