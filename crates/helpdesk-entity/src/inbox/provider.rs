//! Mail provider and provider credential entity models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use helpdesk_core::types::{MailProviderCredentialId, MailProviderId};

/// Endpoints of an external mail provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct MailProvider {
    /// Unique provider identifier.
    pub id: MailProviderId,
    /// Display name.
    pub name: String,
    pub get_uri: String,
    pub send_uri: String,
    pub synchronize_uri: String,
    pub move_uri: String,
    pub get_attachment_uri: String,
    pub create_attachment_uri: String,
}

/// OAuth client credentials for a mailbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct MailProviderCredential {
    /// Unique credential identifier.
    pub id: MailProviderCredentialId,
    /// Directory tenant.
    pub tenant_id: String,
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    #[serde(skip_serializing)]
    pub client_secret: String,
    /// OAuth redirect URI.
    pub redirect_uri: String,
    /// Current access token.
    #[serde(skip_serializing)]
    pub access_token: String,
    /// Access token expiry as a Unix timestamp in seconds.
    pub token_expiry: Option<i64>,
}
