//! Database health check port
//!
//! Lets the readiness probe check the dataset store without knowing
//! which engine backs it.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Database health information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseHealth {
    /// Whether the store answered a trivial query
    pub reachable: bool,
    /// Engine version string, if known
    pub version: Option<String>,
    /// Open connections in the pool
    pub pool_size: Option<u32>,
    /// Round trip of the probe query in milliseconds
    pub response_time_ms: Option<u64>,
}

impl DatabaseHealth {
    #[must_use]
    pub const fn healthy() -> Self {
        Self {
            reachable: true,
            version: None,
            pool_size: None,
            response_time_ms: None,
        }
    }

    #[must_use]
    pub fn healthy_with_version(version: impl Into<String>) -> Self {
        Self {
            version: Some(version.into()),
            ..Self::healthy()
        }
    }

    #[must_use]
    pub const fn unhealthy() -> Self {
        Self {
            reachable: false,
            version: None,
            pool_size: None,
            response_time_ms: None,
        }
    }

    #[must_use]
    pub const fn with_response_time(mut self, ms: u64) -> Self {
        self.response_time_ms = Some(ms);
        self
    }

    #[must_use]
    pub const fn with_pool_size(mut self, size: u32) -> Self {
        self.pool_size = Some(size);
        self
    }
}

/// Port for database health checking operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DatabaseHealthPort: Send + Sync {
    /// Probe with version, pool and latency details
    async fn check_health(&self) -> Result<DatabaseHealth, ApplicationError>;
}
