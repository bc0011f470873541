//! SQLite database health adapter
//!
//! Backs the readiness probe with a version query against the dataset pool.

use std::sync::Arc;
use std::time::Instant;

use application::error::ApplicationError;
use application::ports::{DatabaseHealth, DatabaseHealthPort};
use async_trait::async_trait;
use tokio::task;
use tracing::{debug, instrument};

use super::ConnectionPool;

/// SQLite database health adapter
pub struct SqliteDatabaseHealth {
    pool: Arc<ConnectionPool>,
}

impl std::fmt::Debug for SqliteDatabaseHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteDatabaseHealth")
            .field("max_connections", &self.pool.max_size())
            .finish_non_exhaustive()
    }
}

impl SqliteDatabaseHealth {
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DatabaseHealthPort for SqliteDatabaseHealth {
    #[instrument(skip(self))]
    async fn check_health(&self) -> Result<DatabaseHealth, ApplicationError> {
        let pool = Arc::clone(&self.pool);
        let started = Instant::now();

        let (version, pool_size) = task::spawn_blocking(move || {
            let conn = pool
                .get()
                .map_err(|e| ApplicationError::Internal(format!("No dataset connection: {e}")))?;

            let version: String = conn
                .query_row("SELECT sqlite_version()", [], |row| row.get(0))
                .map_err(|e| ApplicationError::Internal(format!("Probe query failed: {e}")))?;

            Ok::<_, ApplicationError>((version, pool.state().connections))
        })
        .await
        .map_err(|e| ApplicationError::Internal(format!("Probe task failed: {e}")))??;

        let response_time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        debug!(%version, pool_size, response_time_ms, "Dataset probe passed");

        Ok(DatabaseHealth::healthy_with_version(format!("SQLite {version}"))
            .with_pool_size(pool_size)
            .with_response_time(response_time_ms))
    }
}
