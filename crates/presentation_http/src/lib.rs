//! Hawaii climate HTTP presentation layer
//!
//! Read-only JSON API over the station observation dataset.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse, set_expose_internal_errors};
pub use middleware::{RequestId, RequestIdLayer};
pub use routes::create_router;
pub use state::AppState;
