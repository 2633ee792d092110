//! Archived ticket row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;

use helpdesk_core::types::{
    ArchivedTicketId, CustomerId, EmailId, EmailThreadId, PriorityLevelId, SharedInboxGroupId,
    TicketId, TicketStatusId, UserId,
};

use super::email::{ArchivedEmail, ArchivedEmailAttachment};
use super::thread::NewArchivedEmailThread;

/// A ticket as frozen at archival time, with its thread's emails and
/// attachments embedded as JSON documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ArchivedTicket {
    /// Unique snapshot identifier.
    pub id: ArchivedTicketId,
    /// Id of the live ticket.
    pub original_id: TicketId,
    pub created_date: DateTime<Utc>,
    pub received_date: DateTime<Utc>,
    pub email_thread_id: EmailThreadId,
    pub email_thread_subject: String,
    pub email_thread_received_from: String,
    pub email_thread_provider_thread_id: String,
    pub email_thread_provider_thread_topic: String,
    pub created_by_id: Option<UserId>,
    pub ticket_status_id: TicketStatusId,
    pub assigned_to_id: Option<UserId>,
    pub priority_level_id: PriorityLevelId,
    pub completed_date: Option<DateTime<Utc>>,
    pub customer_id: Option<CustomerId>,
    pub archived_date: DateTime<Utc>,
    /// Emails ascending by received date, then id.
    pub emails: Json<Vec<ArchivedEmail>>,
    /// Every attachment of the thread, flattened.
    pub email_attachments: Json<Vec<ArchivedEmailAttachment>>,
    pub shared_inbox_group_id: SharedInboxGroupId,
    pub inbox_group_name: String,
    pub mailbox_email_address: String,
}

impl ArchivedTicket {
    /// Ids of the embedded emails in stored order.
    pub fn email_ids(&self) -> Vec<EmailId> {
        self.emails.iter().map(|email| email.id).collect()
    }
}

/// Data for inserting an [`ArchivedTicket`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewArchivedTicket {
    pub original_id: TicketId,
    pub created_date: DateTime<Utc>,
    pub received_date: DateTime<Utc>,
    pub email_thread_id: EmailThreadId,
    pub email_thread_subject: String,
    pub email_thread_received_from: String,
    pub email_thread_provider_thread_id: String,
    pub email_thread_provider_thread_topic: String,
    pub created_by_id: Option<UserId>,
    pub ticket_status_id: TicketStatusId,
    pub assigned_to_id: Option<UserId>,
    pub priority_level_id: PriorityLevelId,
    pub completed_date: Option<DateTime<Utc>>,
    pub customer_id: Option<CustomerId>,
    pub archived_date: DateTime<Utc>,
    pub emails: Vec<ArchivedEmail>,
    pub email_attachments: Vec<ArchivedEmailAttachment>,
    pub shared_inbox_group_id: SharedInboxGroupId,
    pub inbox_group_name: String,
    pub mailbox_email_address: String,
}

impl NewArchivedTicket {
    /// Attach the storage-assigned id.
    pub fn into_row(self, id: ArchivedTicketId) -> ArchivedTicket {
        ArchivedTicket {
            id,
            original_id: self.original_id,
            created_date: self.created_date,
            received_date: self.received_date,
            email_thread_id: self.email_thread_id,
            email_thread_subject: self.email_thread_subject,
            email_thread_received_from: self.email_thread_received_from,
            email_thread_provider_thread_id: self.email_thread_provider_thread_id,
            email_thread_provider_thread_topic: self.email_thread_provider_thread_topic,
            created_by_id: self.created_by_id,
            ticket_status_id: self.ticket_status_id,
            assigned_to_id: self.assigned_to_id,
            priority_level_id: self.priority_level_id,
            completed_date: self.completed_date,
            customer_id: self.customer_id,
            archived_date: self.archived_date,
            emails: Json(self.emails),
            email_attachments: Json(self.email_attachments),
            shared_inbox_group_id: self.shared_inbox_group_id,
            inbox_group_name: self.inbox_group_name,
            mailbox_email_address: self.mailbox_email_address,
        }
    }
}

/// Every row written by one archival.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveSnapshot {
    /// The ticket snapshot.
    pub ticket: NewArchivedTicket,
    /// The thread snapshot.
    pub thread: NewArchivedEmailThread,
}
