//! Ticket statuses and their per-mailbox allocation.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use helpdesk_core::types::{SharedInboxGroupId, TicketStatusId};

/// A named workflow status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TicketStatus {
    /// Unique status identifier.
    pub id: TicketStatusId,
    /// Display name.
    pub name: String,
    /// Whether administrators may rename the status.
    pub is_editable: bool,
    /// Whether the status may be reordered within a workflow.
    pub is_orderable: bool,
}

/// Placement of a status in one mailbox's workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TicketStatusAllocation {
    /// Unique allocation identifier.
    pub id: i64,
    /// The allocated status.
    pub ticket_status_id: TicketStatusId,
    /// The mailbox whose workflow this belongs to.
    pub shared_inbox_group_id: SharedInboxGroupId,
    /// Position within the workflow.
    pub sort_order: i32,
    /// Whether tickets may currently move into this status.
    pub is_enabled: bool,
}

/// The ordered status workflow of a single mailbox.
#[derive(Debug, Clone, Default)]
pub struct StatusWorkflow {
    steps: Vec<TicketStatusAllocation>,
}

impl StatusWorkflow {
    /// Build a workflow from a mailbox's allocations, ordering by position.
    pub fn new(mut allocations: Vec<TicketStatusAllocation>) -> Self {
        allocations.sort_by_key(|a| (a.sort_order, a.id));
        Self { steps: allocations }
    }

    /// Whether tickets may move into `status`.
    pub fn allows(&self, status: TicketStatusId) -> bool {
        self.steps
            .iter()
            .any(|step| step.ticket_status_id == status && step.is_enabled)
    }

    /// The first enabled status, used for newly opened tickets.
    pub fn initial(&self) -> Option<TicketStatusId> {
        self.steps
            .iter()
            .find(|step| step.is_enabled)
            .map(|step| step.ticket_status_id)
    }
}
