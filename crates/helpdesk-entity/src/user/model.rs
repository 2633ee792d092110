//! User entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use helpdesk_core::types::{RoleId, UserId};

/// A helpdesk agent or administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Employee number.
    pub employee_id: i64,
    /// Assigned role.
    pub role_id: RoleId,
    /// Stored credential. `None` when no password has been set.
    #[serde(skip_serializing)]
    pub password: Option<String>,
    /// Login address.
    pub email: String,
    /// Phone number.
    pub phone_number: String,
    /// Country.
    pub country: String,
    /// Whether the user must choose a new password at next login.
    pub require_password_reset: bool,
}

