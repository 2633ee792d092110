//! Mailbox membership entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use helpdesk_core::types::{SharedInboxGroupId, UserId};

/// Grants a user access to a shared inbox group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SigUserAllocation {
    /// Unique allocation identifier.
    pub id: i64,
    /// The mailbox.
    pub shared_inbox_group_id: SharedInboxGroupId,
    /// The member.
    pub user_id: UserId,
    /// Whether the membership is active.
    pub is_enabled: bool,
}
