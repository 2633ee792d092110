//! Session token entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use helpdesk_core::types::UserId;

/// An opaque session token bound to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AuthToken {
    /// Unique token identifier.
    pub id: i64,
    /// The user the token authenticates.
    pub user_id: UserId,
    /// The opaque token value.
    #[serde(skip_serializing)]
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
    /// When the token was issued.
    pub created_at: DateTime<Utc>,
}

impl AuthToken {
    /// Check if the token has expired at `now`.
    ///
    /// A token is no longer accepted from the instant `expires_at` is reached.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
