//! Email thread, message, and attachment repository.

use sqlx::PgPool;

use helpdesk_core::error::{AppError, ErrorKind};
use helpdesk_core::result::AppResult;
use helpdesk_core::types::EmailThreadId;
use helpdesk_entity::email::{Email, EmailAttachment, EmailThread};

/// Read access to threads and their contents.
#[derive(Debug, Clone)]
pub struct EmailRepository {
    pool: PgPool,
}

impl EmailRepository {
    /// Create a new email repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a thread by ID.
    pub async fn find_thread(&self, id: EmailThreadId) -> AppResult<Option<EmailThread>> {
        sqlx::query_as::<_, EmailThread>("SELECT * FROM email_threads WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find thread", e))
    }

    /// All emails of a thread in arrival order.
    pub async fn find_by_thread(&self, thread_id: EmailThreadId) -> AppResult<Vec<Email>> {
        sqlx::query_as::<_, Email>(
            "SELECT id, email_thread_id, subject_line, body, to_address, from_address, uri, \
             received_date, mail_provider_message_id, gcs_folder, is_deleted \
             FROM emails WHERE email_thread_id = $1 ORDER BY received_date ASC, id ASC",
        )
        .bind(thread_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list emails", e))
    }

    /// All attachments of every email in a thread.
    pub async fn find_attachments_by_thread(
        &self,
        thread_id: EmailThreadId,
    ) -> AppResult<Vec<EmailAttachment>> {
        sqlx::query_as::<_, EmailAttachment>(
            "SELECT a.* FROM email_attachments a \
             JOIN emails e ON e.id = a.email_id \
             WHERE e.email_thread_id = $1 ORDER BY a.id ASC",
        )
        .bind(thread_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list attachments", e))
    }
}
