//! Application layer - Use cases and orchestration
//!
//! Defines the ports the climate queries run against and the service that
//! computes the startup context and shapes every query result.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
