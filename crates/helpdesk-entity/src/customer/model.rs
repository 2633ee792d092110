//! Customer entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use helpdesk_core::types::CustomerId;

/// An organisation that raises tickets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Customer {
    /// Unique customer identifier.
    pub id: CustomerId,
    /// Agency name.
    pub agency_name: String,
    /// Contact address.
    pub email: String,
    /// Mail domain used for priority rule matching.
    pub email_domain: String,
    /// Whether the customer is active.
    pub is_active: bool,
    /// Whether the customer record was deleted.
    pub is_deleted: bool,
}
