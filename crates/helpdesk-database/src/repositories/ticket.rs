//! Ticket repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgExecutor;

use helpdesk_core::error::{AppError, ErrorKind};
use helpdesk_core::result::AppResult;
use helpdesk_core::types::TicketId;
use helpdesk_entity::ticket::{CreateTicket, Ticket, TicketRow};

/// Repository for ticket rows.
///
/// Statements that must take part in a caller's transaction are associated
/// functions generic over the executor; the rest run on the pool.
#[derive(Debug, Clone)]
pub struct TicketRepository {
    pool: PgPool,
}

impl TicketRepository {
    /// Create a new ticket repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a ticket by ID.
    pub async fn find_by_id(&self, id: TicketId) -> AppResult<Option<Ticket>> {
        sqlx::query_as::<_, TicketRow>("SELECT * FROM tickets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find ticket", e))?
            .map(Ticket::try_from)
            .transpose()
    }

    /// Create a new ticket record.
    pub async fn create(&self, data: &CreateTicket) -> AppResult<Ticket> {
        let row = sqlx::query_as::<_, TicketRow>(
            "INSERT INTO tickets (created_date, received_date, email_thread_id, customer_id, \
             priority_level_id, ticket_status_id, created_by_id, assigned_to_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(data.created_date)
        .bind(data.received_date)
        .bind(data.email_thread_id)
        .bind(data.customer_id)
        .bind(data.priority_level_id)
        .bind(data.ticket_status_id)
        .bind(data.created_by)
        .bind(data.assigned_to)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create ticket", e))?;

        Ticket::try_from(row)
    }

    /// Lock a ticket row for the rest of the enclosing transaction.
    pub async fn lock<'e, E>(executor: E, id: TicketId) -> AppResult<Option<TicketRow>>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, TicketRow>("SELECT * FROM tickets WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(executor)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock ticket", e))
    }

    /// Write every mutable column of `ticket` if the stored version still
    /// equals `ticket.version`. Returns `None` when it does not.
    pub async fn update_versioned<'e, E>(executor: E, ticket: &Ticket) -> AppResult<Option<Ticket>>
    where
        E: PgExecutor<'e>,
    {
        let row = TicketRow::from(ticket);
        sqlx::query_as::<_, TicketRow>(
            "UPDATE tickets SET customer_id = $2, priority_level_id = $3, ticket_status_id = $4, \
             assigned_to_id = $5, is_deleted = $6, deleted_date = $7, deleted_by_id = $8, \
             is_archived = $9, archived_date = $10, completed_date = $11, \
             version = version + 1 \
             WHERE id = $1 AND version = $12 RETURNING *",
        )
        .bind(row.id)
        .bind(row.customer_id)
        .bind(row.priority_level_id)
        .bind(row.ticket_status_id)
        .bind(row.assigned_to_id)
        .bind(row.is_deleted)
        .bind(row.deleted_date)
        .bind(row.deleted_by_id)
        .bind(row.is_archived)
        .bind(row.archived_date)
        .bind(row.completed_date)
        .bind(row.version)
        .fetch_optional(executor)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update ticket", e))?
        .map(Ticket::try_from)
        .transpose()
    }

    /// Conditionally update a ticket outside any wider transaction.
    pub async fn update(&self, ticket: &Ticket) -> AppResult<Option<Ticket>> {
        Self::update_versioned(&self.pool, ticket).await
    }

    /// IDs of completed, live tickets finished before `cutoff`, oldest first.
    pub async fn find_archivable(
        &self,
        cutoff: DateTime<Utc>,
        limit: u32,
    ) -> AppResult<Vec<TicketId>> {
        sqlx::query_scalar::<_, TicketId>(
            "SELECT id FROM tickets \
             WHERE completed_date < $1 AND is_deleted = FALSE AND is_archived = FALSE \
             ORDER BY completed_date ASC, id ASC LIMIT $2",
        )
        .bind(cutoff)
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find archivable tickets", e)
        })
    }
}
