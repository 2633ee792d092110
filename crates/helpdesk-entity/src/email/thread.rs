//! Email thread entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use helpdesk_core::types::{EmailThreadId, SharedInboxGroupId};

use super::attachment::EmailAttachment;
use super::message::Email;
use crate::inbox::SharedInboxGroup;

/// A conversation sharing one provider-side thread id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct EmailThread {
    /// Unique thread identifier.
    pub id: EmailThreadId,
    /// Sender of the first message.
    pub received_from: String,
    /// Subject of the first message.
    pub subject_line: String,
    /// The mailbox that received the thread.
    pub shared_inbox_group_id: SharedInboxGroupId,
    /// When the first message arrived.
    pub received_date: DateTime<Utc>,
    /// Provider-side conversation id.
    pub provider_thread_id: String,
    /// Provider-side conversation topic.
    pub provider_thread_topic: String,
}

/// A thread together with everything archival needs to snapshot it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadBundle {
    /// The thread itself.
    pub thread: EmailThread,
    /// The mailbox that owns the thread.
    pub inbox: SharedInboxGroup,
    /// All emails of the thread, in no particular order.
    pub emails: Vec<Email>,
    /// All attachments of those emails, in no particular order.
    pub attachments: Vec<EmailAttachment>,
}
