//! Ticket lifecycle and archival configuration.

use serde::{Deserialize, Serialize};

/// Settings for the ticket lifecycle manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleConfig {
    /// How many times a transition is re-validated after losing a
    /// version race before giving up with a conflict.
    #[serde(default = "default_max_conflict_retries")]
    pub max_conflict_retries: u32,
    /// Priority level used when no priority rule matches the customer.
    #[serde(default = "default_priority_level_id")]
    pub default_priority_level_id: i64,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            max_conflict_retries: default_max_conflict_retries(),
            default_priority_level_id: default_priority_level_id(),
        }
    }
}

/// Settings for the completed-ticket archive sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Completed tickets older than this many days are archived.
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
    /// Maximum tickets archived per sweep.
    #[serde(default = "default_batch_size")]
    pub batch_size: u32,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            retention_days: default_retention_days(),
            batch_size: default_batch_size(),
        }
    }
}

fn default_max_conflict_retries() -> u32 {
    3
}

fn default_priority_level_id() -> i64 {
    1
}

fn default_retention_days() -> u32 {
    90
}

fn default_batch_size() -> u32 {
    500
}
