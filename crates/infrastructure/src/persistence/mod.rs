//! Persistence module
//!
//! Read-only SQLite access to the Hawaii observation dataset.

pub mod climate_store;
pub mod connection;
pub mod database_health;

pub use climate_store::SqliteClimateStore;
pub use connection::{ConnectionPool, DatabaseError, create_pool};
pub use database_health::SqliteDatabaseHealth;
