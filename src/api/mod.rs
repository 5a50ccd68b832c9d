//! HTTP API for the recommendation engine

pub mod handlers;
pub mod routes;

pub use handlers::{recommend, AdvisorState, ApiError};
pub use routes::build_router;
