//! Archived ticket and thread repository.

use sqlx::PgPool;
use sqlx::postgres::PgExecutor;
use sqlx::types::Json;

use helpdesk_core::error::{AppError, ErrorKind};
use helpdesk_core::result::AppResult;
use helpdesk_core::types::TicketId;
use helpdesk_entity::archive::{
    ArchivedEmailThread, ArchivedTicket, NewArchivedEmailThread, NewArchivedTicket,
};

/// Repository for archive snapshots. Rows are insert-only.
#[derive(Debug, Clone)]
pub struct ArchiveRepository {
    pool: PgPool,
}

impl ArchiveRepository {
    /// Create a new archive repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Snapshots of one live ticket.
    pub async fn find_by_original(&self, original_id: TicketId) -> AppResult<Vec<ArchivedTicket>> {
        sqlx::query_as::<_, ArchivedTicket>(
            "SELECT * FROM archived_tickets WHERE original_id = $1 ORDER BY id",
        )
        .bind(original_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find archived ticket", e)
        })
    }

    /// Count the snapshots of one live ticket.
    pub async fn count_by_original(&self, original_id: TicketId) -> AppResult<u64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM archived_tickets WHERE original_id = $1")
                .bind(original_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count archived tickets", e)
                })?;
        Ok(count.max(0) as u64)
    }

    /// Insert a ticket snapshot.
    ///
    /// Fails with a unique violation if the ticket already has one.
    pub async fn insert_ticket<'e, E>(
        executor: E,
        data: &NewArchivedTicket,
    ) -> Result<ArchivedTicket, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, ArchivedTicket>(
            "INSERT INTO archived_tickets (original_id, created_date, received_date, \
             email_thread_id, email_thread_subject, email_thread_received_from, \
             email_thread_provider_thread_id, email_thread_provider_thread_topic, \
             created_by_id, ticket_status_id, assigned_to_id, priority_level_id, \
             completed_date, customer_id, archived_date, emails, email_attachments, \
             shared_inbox_group_id, inbox_group_name, mailbox_email_address) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, \
             $16, $17, $18, $19, $20) RETURNING *",
        )
        .bind(data.original_id)
        .bind(data.created_date)
        .bind(data.received_date)
        .bind(data.email_thread_id)
        .bind(&data.email_thread_subject)
        .bind(&data.email_thread_received_from)
        .bind(&data.email_thread_provider_thread_id)
        .bind(&data.email_thread_provider_thread_topic)
        .bind(data.created_by_id)
        .bind(data.ticket_status_id)
        .bind(data.assigned_to_id)
        .bind(data.priority_level_id)
        .bind(data.completed_date)
        .bind(data.customer_id)
        .bind(data.archived_date)
        .bind(Json(&data.emails))
        .bind(Json(&data.email_attachments))
        .bind(data.shared_inbox_group_id)
        .bind(&data.inbox_group_name)
        .bind(&data.mailbox_email_address)
        .fetch_one(executor)
        .await
    }

    /// Insert a thread snapshot.
    pub async fn insert_thread<'e, E>(
        executor: E,
        data: &NewArchivedEmailThread,
    ) -> AppResult<ArchivedEmailThread>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, ArchivedEmailThread>(
            "INSERT INTO archived_email_threads (original_id, received_from, subject_line, \
             shared_inbox_group_id, received_date, provider_thread_id, provider_thread_topic, \
             archived_date) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(data.original_id)
        .bind(&data.received_from)
        .bind(&data.subject_line)
        .bind(data.shared_inbox_group_id)
        .bind(data.received_date)
        .bind(&data.provider_thread_id)
        .bind(&data.provider_thread_topic)
        .bind(data.archived_date)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to insert archived thread", e)
        })
    }
}
