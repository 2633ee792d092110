//! Relational row shape of the `tickets` table.
//!
//! The table keeps the lifecycle as independent flag columns. Converting a
//! row into a [`Ticket`] validates that the flags describe exactly one
//! [`TicketState`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use helpdesk_core::error::AppError;
use helpdesk_core::types::{
    CustomerId, EmailThreadId, PriorityLevelId, TicketId, TicketStatusId, UserId,
};

use super::model::Ticket;
use super::state::TicketState;

/// A row of the `tickets` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TicketRow {
    pub id: TicketId,
    pub created_date: DateTime<Utc>,
    pub received_date: DateTime<Utc>,
    pub email_thread_id: EmailThreadId,
    pub customer_id: Option<CustomerId>,
    pub priority_level_id: PriorityLevelId,
    pub ticket_status_id: TicketStatusId,
    pub created_by_id: Option<UserId>,
    pub assigned_to_id: Option<UserId>,
    pub is_deleted: bool,
    pub deleted_date: Option<DateTime<Utc>>,
    pub deleted_by_id: Option<UserId>,
    pub is_archived: bool,
    pub archived_date: Option<DateTime<Utc>>,
    pub completed_date: Option<DateTime<Utc>>,
    pub version: i32,
}

impl TicketRow {
    fn state(&self) -> Result<TicketState, AppError> {
        if self.is_archived {
            // Deletion columns are irrelevant once archived.
            let archived_at = self.archived_date.ok_or_else(|| {
                AppError::validation(format!(
                    "Ticket {} is archived but has no archived_date",
                    self.id
                ))
            })?;
            return Ok(TicketState::Archived {
                archived_at,
                completed_at: self.completed_date,
            });
        }

        if self.archived_date.is_some() {
            return Err(AppError::validation(format!(
                "Ticket {} has an archived_date but is not archived",
                self.id
            )));
        }

        if self.is_deleted {
            let (Some(deleted_at), Some(deleted_by)) = (self.deleted_date, self.deleted_by_id)
            else {
                return Err(AppError::validation(format!(
                    "Ticket {} is deleted but is missing deleted_date or deleted_by_id",
                    self.id
                )));
            };
            return Ok(TicketState::Deleted {
                deleted_by,
                deleted_at,
                completed_at: self.completed_date,
            });
        }

        if self.deleted_date.is_some() || self.deleted_by_id.is_some() {
            return Err(AppError::validation(format!(
                "Ticket {} has deletion fields but is not deleted",
                self.id
            )));
        }

        Ok(match self.completed_date {
            Some(completed_at) => TicketState::Completed { completed_at },
            None => TicketState::Active,
        })
    }
}

impl TryFrom<TicketRow> for Ticket {
    type Error = AppError;

    fn try_from(row: TicketRow) -> Result<Self, Self::Error> {
        let state = row.state()?;
        Ok(Self {
            id: row.id,
            created_date: row.created_date,
            received_date: row.received_date,
            email_thread_id: row.email_thread_id,
            customer_id: row.customer_id,
            priority_level_id: row.priority_level_id,
            ticket_status_id: row.ticket_status_id,
            created_by: row.created_by_id,
            assigned_to: row.assigned_to_id,
            state,
            version: row.version,
        })
    }
}

impl From<&Ticket> for TicketRow {
    fn from(ticket: &Ticket) -> Self {
        let state = &ticket.state;
        Self {
            id: ticket.id,
            created_date: ticket.created_date,
            received_date: ticket.received_date,
            email_thread_id: ticket.email_thread_id,
            customer_id: ticket.customer_id,
            priority_level_id: ticket.priority_level_id,
            ticket_status_id: ticket.ticket_status_id,
            created_by_id: ticket.created_by,
            assigned_to_id: ticket.assigned_to,
            is_deleted: state.is_deleted(),
            deleted_date: state.deleted_at(),
            deleted_by_id: state.deleted_by(),
            is_archived: state.is_archived(),
            archived_date: state.archived_at(),
            completed_date: state.completed_at(),
            version: ticket.version,
        }
    }
}
