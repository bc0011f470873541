//! Database (SQLite) configuration.

use serde::{Deserialize, Serialize};

/// SQLite dataset configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the pre-populated SQLite dataset
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Maximum number of concurrent read connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds to wait for a free pooled connection
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout_secs: u64,
}

fn default_db_path() -> String {
    "Resources/hawaii.sqlite".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

const fn default_connection_timeout() -> u64 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
            connection_timeout_secs: default_connection_timeout(),
        }
    }
}
