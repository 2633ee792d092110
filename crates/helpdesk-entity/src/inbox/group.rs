//! Shared inbox group entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use helpdesk_core::types::{MailProviderCredentialId, MailProviderId, SharedInboxGroupId};

/// A mailbox configuration that routes incoming email to tickets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SharedInboxGroup {
    /// Unique group identifier.
    pub id: SharedInboxGroupId,
    /// Display name.
    pub inbox_group_name: String,
    /// The mailbox address.
    pub email_address: String,
    /// Whether tickets are opened automatically for new threads.
    pub is_automatic: bool,
    /// Whether the mailbox is being synchronized.
    pub is_enabled: bool,
    /// Provider credential used to reach the mailbox.
    pub mail_provider_credential_id: MailProviderCredentialId,
    /// Provider hosting the mailbox.
    pub mail_provider_id: MailProviderId,
    /// Last successful synchronization.
    pub last_sync_time: Option<DateTime<Utc>>,
    /// When the mailbox was disabled.
    pub disabled_time: Option<DateTime<Utc>>,
    /// Signature appended to outgoing replies.
    pub email_signature: String,
}
