//! One-time passcode entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use helpdesk_core::types::UserId;

/// A one-time passcode issued to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct OtpCode {
    /// Unique code identifier.
    pub id: i64,
    /// The user the code was issued to.
    pub user_id: UserId,
    /// The code value.
    #[serde(skip_serializing)]
    pub code: String,
    /// Expiry instant. The code is valid strictly before this time.
    pub expires_at: DateTime<Utc>,
    /// When the code was issued.
    pub created_at: DateTime<Utc>,
}

impl OtpCode {
    /// Check if the code is still valid at `now`.
    ///
    /// Validity ends at `expires_at`: a code checked at exactly its expiry
    /// instant is rejected.
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}
