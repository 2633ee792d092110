//! Request context carrying the acting user.

use serde::{Deserialize, Serialize};

use helpdesk_core::types::{RoleId, UserId};

/// Who is performing a lifecycle operation.
///
/// Built by the caller's identity layer once it has authenticated the user
/// and checked their role's permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// The acting user's ID.
    pub user_id: UserId,
    /// The acting user's role.
    pub role_id: RoleId,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: UserId, role_id: RoleId) -> Self {
        Self { user_id, role_id }
    }
}
