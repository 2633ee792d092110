//! Ticket entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use helpdesk_core::types::{
    CustomerId, EmailThreadId, PriorityLevelId, TicketId, TicketStatusId, UserId,
};

use super::state::TicketState;

/// A unit of customer-support work tied to an email thread.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique ticket identifier.
    pub id: TicketId,
    /// When the ticket record was created.
    pub created_date: DateTime<Utc>,
    /// When the first email of the thread arrived.
    pub received_date: DateTime<Utc>,
    /// The email thread this ticket tracks.
    pub email_thread_id: EmailThreadId,
    /// The customer the ticket belongs to, if identified.
    pub customer_id: Option<CustomerId>,
    /// Priority level.
    pub priority_level_id: PriorityLevelId,
    /// Workflow status within the owning inbox.
    pub ticket_status_id: TicketStatusId,
    /// The user who created the ticket (`None` for tickets opened by mail).
    pub created_by: Option<UserId>,
    /// The assignee. `None` means unassigned.
    pub assigned_to: Option<UserId>,
    /// Lifecycle state.
    #[serde(flatten)]
    pub state: TicketState,
    /// Optimistic concurrency counter, bumped by every write.
    pub version: i32,
}

impl Ticket {
    /// Return a copy with a new state, leaving `self` untouched.
    pub fn with_state(&self, state: TicketState) -> Self {
        Self {
            state,
            ..self.clone()
        }
    }
}

/// Data required to insert a new ticket record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTicket {
    /// Creation time.
    pub created_date: DateTime<Utc>,
    /// When the first email arrived.
    pub received_date: DateTime<Utc>,
    /// The email thread the ticket tracks.
    pub email_thread_id: EmailThreadId,
    /// The customer, if identified.
    pub customer_id: Option<CustomerId>,
    /// Resolved priority level.
    pub priority_level_id: PriorityLevelId,
    /// Initial workflow status.
    pub ticket_status_id: TicketStatusId,
    /// Creating user.
    pub created_by: Option<UserId>,
    /// Initial assignee.
    pub assigned_to: Option<UserId>,
}

impl CreateTicket {
    /// Materialise the record as a fresh `Active` ticket.
    pub fn into_ticket(self, id: TicketId) -> Ticket {
        Ticket {
            id,
            created_date: self.created_date,
            received_date: self.received_date,
            email_thread_id: self.email_thread_id,
            customer_id: self.customer_id,
            priority_level_id: self.priority_level_id,
            ticket_status_id: self.ticket_status_id,
            created_by: self.created_by,
            assigned_to: self.assigned_to,
            state: TicketState::Active,
            version: 0,
        }
    }
}
