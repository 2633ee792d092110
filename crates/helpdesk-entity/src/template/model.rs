//! Email template entity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A canned reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct EmailTemplate {
    /// Unique template identifier.
    pub id: i64,
    /// Display title.
    pub title: String,
    /// Last edit time.
    pub last_updated_on: DateTime<Utc>,
    /// Subject line.
    pub subject: String,
    /// Body, with placeholders named by [`EmailTemplateField`]s.
    pub body: String,
}

/// A placeholder usable in templates, bound to a ticket property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct EmailTemplateField {
    /// Unique field identifier.
    pub id: i64,
    /// Placeholder name.
    pub name: String,
    /// Ticket property substituted for the placeholder.
    pub ticket_property: String,
}
