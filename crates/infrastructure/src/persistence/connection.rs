//! Database connection management
//!
//! Provides read-only SQLite connection pooling via r2d2. The pool is the
//! only way request handlers reach the dataset; each query borrows one
//! connection and returns it when the guard drops.

use std::path::Path;
use std::time::Duration;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, OpenFlags};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::DatabaseConfig;

/// Tables and columns the service reads
const REQUIRED_SCHEMA: &[(&str, &str)] = &[
    ("measurement", "station, date, prcp, tobs"),
    ("station", "station"),
];

/// Database errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Dataset schema error: {0}")]
    Schema(String),

    #[error("Database not found: {0}")]
    NotFound(String),

    #[error("Invalid pool settings: {0}")]
    InvalidSettings(String),
}

/// SQLite connection pool type alias
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Open the dataset read-only and verify its schema
///
/// Fails fast when the pool settings are zero, the file is missing or
/// cannot be opened, or it lacks the expected tables and columns.
pub fn create_pool(config: &DatabaseConfig) -> Result<ConnectionPool, DatabaseError> {
    info!(path = %config.path, max_connections = config.max_connections, "Opening dataset");

    // r2d2 panics on a zero pool size or timeout
    if config.max_connections == 0 {
        return Err(DatabaseError::InvalidSettings(
            "max_connections must be at least 1".to_string(),
        ));
    }
    if config.connection_timeout_secs == 0 {
        return Err(DatabaseError::InvalidSettings(
            "connection_timeout_secs must be at least 1".to_string(),
        ));
    }

    if !Path::new(&config.path).is_file() {
        return Err(DatabaseError::NotFound(config.path.clone()));
    }

    let manager = SqliteConnectionManager::file(&config.path)
        .with_flags(
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_init(|conn| conn.execute_batch("PRAGMA query_only = ON;"));

    let pool = Pool::builder()
        .max_size(config.max_connections)
        .connection_timeout(Duration::from_secs(config.connection_timeout_secs))
        .build(manager)?;

    {
        let conn = pool.get()?;
        verify_schema(&conn)?;
    }

    debug!("Dataset connection pool created successfully");
    Ok(pool)
}

/// Check that every required column can be selected
fn verify_schema(conn: &Connection) -> Result<(), DatabaseError> {
    for (table, columns) in REQUIRED_SCHEMA {
        conn.prepare(&format!("SELECT {columns} FROM {table} LIMIT 0"))
            .map_err(|e| {
                DatabaseError::Schema(format!("table `{table}` must provide ({columns}): {e}"))
            })?;
    }
    Ok(())
}
