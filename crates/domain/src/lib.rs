//! Domain layer for the climate query service
//!
//! Contains the observation entities, value objects, and domain errors.
//! This layer has no I/O and defines the ubiquitous language: measurements,
//! stations, the reference window, and temperature statistics.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
