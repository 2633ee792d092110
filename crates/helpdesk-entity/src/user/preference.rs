//! User preference entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use helpdesk_core::types::UserId;

/// A typed key/value preference. Rows without a user are global defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserPreference {
    /// Unique preference identifier.
    pub id: i64,
    /// Owning user, or `None` for a global default.
    pub user_id: Option<UserId>,
    /// Preference category.
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub key: String,
    pub value: String,
}
