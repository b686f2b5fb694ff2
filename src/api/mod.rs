//! HTTP API: the trip form, the JSON planning endpoint, and health.

mod error;
pub mod routes;
pub mod types;

pub use error::PlanError;
pub use routes::{serve, AppState};
