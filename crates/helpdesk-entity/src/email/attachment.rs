//! Email attachment entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use helpdesk_core::types::{AttachmentId, EmailId};

/// A file attached to an email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct EmailAttachment {
    /// Unique attachment identifier.
    pub id: AttachmentId,
    /// The email carrying the attachment.
    pub email_id: EmailId,
    /// Location of the stored content.
    pub uri: String,
    /// Original file name.
    pub filename: String,
    /// MIME type.
    pub content_type: String,
    /// Whether the attachment is rendered inline in the body.
    pub inline: bool,
}
