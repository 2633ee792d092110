//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use helpdesk_core::types::{TicketId, UserId};

/// Tells a user that something happened on a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: i64,
    /// Recipient.
    pub user_id: UserId,
    /// The ticket concerned.
    pub ticket_id: TicketId,
    /// When the notification was raised.
    pub notification_time: DateTime<Utc>,
}
