//! Embedded email documents stored inside an archived ticket.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use helpdesk_core::types::{AttachmentId, EmailId};

use crate::email::{Email, EmailAttachment};

/// An email as frozen into an archived ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedEmail {
    /// Id of the live email at archival time.
    pub id: EmailId,
    /// Subject line.
    pub subject_line: String,
    /// Message body.
    pub body: String,
    /// Recipients.
    #[serde(rename = "to")]
    pub to_address: String,
    /// Sender.
    #[serde(rename = "from")]
    pub from_address: String,
    /// Location of the raw message.
    pub uri: String,
    /// When the message arrived.
    pub received_date: DateTime<Utc>,
    /// Provider-side message id.
    pub mail_provider_message_id: String,
    /// Attachments of this email, ascending by id.
    pub attachments: Vec<ArchivedEmailAttachment>,
    /// Storage folder of the attachment blobs.
    pub gcs_folder: String,
}

impl ArchivedEmail {
    /// Snapshot `email` with the given (already ordered) attachments.
    pub fn capture(email: &Email, attachments: Vec<ArchivedEmailAttachment>) -> Self {
        Self {
            id: email.id,
            subject_line: email.subject_line.clone(),
            body: email.body.clone(),
            to_address: email.to_address.clone(),
            from_address: email.from_address.clone(),
            uri: email.uri.clone(),
            received_date: email.received_date,
            mail_provider_message_id: email.mail_provider_message_id.clone(),
            attachments,
            gcs_folder: email.gcs_folder.clone(),
        }
    }
}

/// An attachment as frozen into an archived ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedEmailAttachment {
    /// Id of the live attachment at archival time.
    pub id: AttachmentId,
    /// The email it belonged to.
    pub email_id: EmailId,
    /// Location of the stored content.
    pub uri: String,
    /// Original file name.
    pub filename: String,
    /// MIME type.
    pub content_type: String,
    /// Whether it was rendered inline.
    pub inline: bool,
}

impl From<&EmailAttachment> for ArchivedEmailAttachment {
    fn from(attachment: &EmailAttachment) -> Self {
        Self {
            id: attachment.id,
            email_id: attachment.email_id,
            uri: attachment.uri.clone(),
            filename: attachment.filename.clone(),
            content_type: attachment.content_type.clone(),
            inline: attachment.inline,
        }
    }
}
