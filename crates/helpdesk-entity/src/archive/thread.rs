//! Archived email thread row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use helpdesk_core::types::{ArchivedEmailThreadId, EmailThreadId, SharedInboxGroupId};

use crate::email::EmailThread;

/// A thread as frozen at archival time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ArchivedEmailThread {
    /// Unique snapshot identifier.
    pub id: ArchivedEmailThreadId,
    /// Id of the live thread.
    pub original_id: EmailThreadId,
    pub received_from: String,
    pub subject_line: String,
    pub shared_inbox_group_id: SharedInboxGroupId,
    pub received_date: DateTime<Utc>,
    pub provider_thread_id: String,
    pub provider_thread_topic: String,
    /// When the snapshot was taken.
    pub archived_date: DateTime<Utc>,
}

/// Data for inserting an [`ArchivedEmailThread`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewArchivedEmailThread {
    pub original_id: EmailThreadId,
    pub received_from: String,
    pub subject_line: String,
    pub shared_inbox_group_id: SharedInboxGroupId,
    pub received_date: DateTime<Utc>,
    pub provider_thread_id: String,
    pub provider_thread_topic: String,
    pub archived_date: DateTime<Utc>,
}

impl NewArchivedEmailThread {
    /// Snapshot `thread` at `archived_at`.
    pub fn capture(thread: &EmailThread, archived_at: DateTime<Utc>) -> Self {
        Self {
            original_id: thread.id,
            received_from: thread.received_from.clone(),
            subject_line: thread.subject_line.clone(),
            shared_inbox_group_id: thread.shared_inbox_group_id,
            received_date: thread.received_date,
            provider_thread_id: thread.provider_thread_id.clone(),
            provider_thread_topic: thread.provider_thread_topic.clone(),
            archived_date: archived_at,
        }
    }

    /// Attach the storage-assigned id.
    pub fn into_row(self, id: ArchivedEmailThreadId) -> ArchivedEmailThread {
        ArchivedEmailThread {
            id,
            original_id: self.original_id,
            received_from: self.received_from,
            subject_line: self.subject_line,
            shared_inbox_group_id: self.shared_inbox_group_id,
            received_date: self.received_date,
            provider_thread_id: self.provider_thread_id,
            provider_thread_topic: self.provider_thread_topic,
            archived_date: self.archived_date,
        }
    }
}
