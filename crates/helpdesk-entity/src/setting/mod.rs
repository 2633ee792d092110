//! Global key/value settings.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A system-wide setting stored in `system_settings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SystemSetting {
    /// Setting name (primary key).
    pub key: String,
    /// Raw value.
    pub value: String,
}
