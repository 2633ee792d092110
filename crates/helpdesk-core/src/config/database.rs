//! Database configuration.

use serde::{Deserialize, Serialize};

/// PostgreSQL settings for the ticket store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Seconds to wait for a free connection.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Upper bound on waiting for a ticket row lock, in milliseconds.
    /// An archive blocked longer than this fails with a database error.
    #[serde(default = "default_lock_timeout")]
    pub lock_timeout_ms: u64,
    /// Reported to PostgreSQL as `application_name`.
    #[serde(default = "default_application_name")]
    pub application_name: String,
    /// Run pending migrations on startup.
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

fn default_max_connections() -> u32 {
    5
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_lock_timeout() -> u64 {
    5_000
}

fn default_application_name() -> String {
    "helpdesk-archiver".to_string()
}

fn default_run_migrations() -> bool {
    true
}
