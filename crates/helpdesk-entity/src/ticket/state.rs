//! Ticket lifecycle state.
//!
//! The relational schema tracks deletion and archival with independent
//! flags. Here the lifecycle is a single tagged variant, so combinations
//! such as "archived and then deleted" cannot be constructed. Completion is
//! carried through deletion and archival: a restored ticket returns to the
//! state it was deleted from, and an archive snapshot keeps its completion
//! date.
//!
//! ```text
//! Active ──complete()──▶ Completed
//!   │                        │
//!   └──soft_delete()──┬──────┘
//!                     ▼
//!                  Deleted ──restore()──▶ Active | Completed
//!
//! Active | Completed | Deleted ──archive()──▶ Archived (terminal)
//! ```

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use helpdesk_core::error::AppError;
use helpdesk_core::types::UserId;

/// The lifecycle state of a live ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TicketState {
    /// Open work.
    Active,
    /// Work finished.
    Completed {
        /// When the ticket was completed.
        completed_at: DateTime<Utc>,
    },
    /// Soft-deleted; may be restored.
    Deleted {
        /// The user who deleted the ticket.
        deleted_by: UserId,
        /// When the ticket was deleted.
        deleted_at: DateTime<Utc>,
        /// Completion time held over from before the deletion.
        completed_at: Option<DateTime<Utc>>,
    },
    /// Copied into the archive and frozen.
    Archived {
        /// When the ticket was archived.
        archived_at: DateTime<Utc>,
        /// Completion time held over from before archival.
        completed_at: Option<DateTime<Utc>>,
    },
}

/// Field-less discriminant of [`TicketState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStateKind {
    /// See [`TicketState::Active`].
    Active,
    /// See [`TicketState::Completed`].
    Completed,
    /// See [`TicketState::Deleted`].
    Deleted,
    /// See [`TicketState::Archived`].
    Archived,
}

impl TicketStateKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Deleted => "deleted",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for TicketStateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TicketState {
    /// Return the discriminant.
    pub fn kind(&self) -> TicketStateKind {
        match self {
            Self::Active => TicketStateKind::Active,
            Self::Completed { .. } => TicketStateKind::Completed,
            Self::Deleted { .. } => TicketStateKind::Deleted,
            Self::Archived { .. } => TicketStateKind::Archived,
        }
    }

    /// Whether the ticket has been archived.
    pub fn is_archived(&self) -> bool {
        matches!(self, Self::Archived { .. })
    }

    /// Whether the ticket is soft-deleted.
    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted { .. })
    }

    /// Completion time, if the ticket was ever completed.
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        match *self {
            Self::Active => None,
            Self::Completed { completed_at } => Some(completed_at),
            Self::Deleted { completed_at, .. } | Self::Archived { completed_at, .. } => {
                completed_at
            }
        }
    }

    /// Deletion time, if deleted.
    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        match *self {
            Self::Deleted { deleted_at, .. } => Some(deleted_at),
            _ => None,
        }
    }

    /// The deleting user, if deleted.
    pub fn deleted_by(&self) -> Option<UserId> {
        match *self {
            Self::Deleted { deleted_by, .. } => Some(deleted_by),
            _ => None,
        }
    }

    /// Archival time, if archived.
    pub fn archived_at(&self) -> Option<DateTime<Utc>> {
        match *self {
            Self::Archived { archived_at, .. } => Some(archived_at),
            _ => None,
        }
    }

    /// Reject any mutation of an archived ticket.
    pub fn ensure_not_archived(&self, action: &str) -> Result<(), AppError> {
        if self.is_archived() {
            return Err(AppError::invalid_state(format!(
                "Cannot {action} an archived ticket"
            )));
        }
        Ok(())
    }

    /// `Active → Completed`.
    pub fn complete(&self, at: DateTime<Utc>) -> Result<Self, AppError> {
        match self {
            Self::Active => Ok(Self::Completed { completed_at: at }),
            other => Err(AppError::invalid_state(format!(
                "Only active tickets can be completed; ticket is {}",
                other.kind()
            ))),
        }
    }

    /// `Active | Completed → Deleted`.
    pub fn soft_delete(&self, by: UserId, at: DateTime<Utc>) -> Result<Self, AppError> {
        match self {
            Self::Deleted { .. } => Err(AppError::already_deleted("Ticket is already deleted")),
            Self::Archived { .. } => Err(AppError::invalid_state(
                "Cannot delete an archived ticket",
            )),
            Self::Active | Self::Completed { .. } => Ok(Self::Deleted {
                deleted_by: by,
                deleted_at: at,
                completed_at: self.completed_at(),
            }),
        }
    }

    /// `Deleted → Active | Completed`.
    pub fn restore(&self) -> Result<Self, AppError> {
        match *self {
            Self::Deleted { completed_at, .. } => Ok(match completed_at {
                Some(completed_at) => Self::Completed { completed_at },
                None => Self::Active,
            }),
            other => Err(AppError::not_deleted(format!(
                "Only deleted tickets can be restored; ticket is {}",
                other.kind()
            ))),
        }
    }

    /// `Active | Completed | Deleted → Archived`.
    pub fn archive(&self, at: DateTime<Utc>) -> Result<Self, AppError> {
        match self {
            Self::Archived { .. } => Err(AppError::already_archived("Ticket is already archived")),
            _ => Ok(Self::Archived {
                archived_at: at,
                completed_at: self.completed_at(),
            }),
        }
    }
}
