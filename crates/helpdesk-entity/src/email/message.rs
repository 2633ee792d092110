//! Email entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use helpdesk_core::types::{EmailId, EmailThreadId};

/// A single message within an email thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Email {
    /// Unique email identifier.
    pub id: EmailId,
    /// The owning thread.
    pub email_thread_id: EmailThreadId,
    /// Subject line.
    pub subject_line: String,
    /// Message body.
    pub body: String,
    /// Recipient list as received.
    pub to_address: String,
    /// Sender as received.
    pub from_address: String,
    /// Location of the raw message.
    pub uri: String,
    /// When the message arrived.
    pub received_date: DateTime<Utc>,
    /// The provider-side message id.
    pub mail_provider_message_id: String,
    /// Storage folder holding the message's attachment blobs.
    pub gcs_folder: String,
    /// Whether the message was removed from the thread view.
    pub is_deleted: bool,
}
