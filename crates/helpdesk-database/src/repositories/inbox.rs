//! Shared inbox group and status workflow repository.

use sqlx::PgPool;

use helpdesk_core::error::{AppError, ErrorKind};
use helpdesk_core::result::AppResult;
use helpdesk_core::types::SharedInboxGroupId;
use helpdesk_entity::inbox::{SharedInboxGroup, TicketStatusAllocation};

/// Read access to mailboxes and their workflows.
#[derive(Debug, Clone)]
pub struct InboxRepository {
    pool: PgPool,
}

impl InboxRepository {
    /// Create a new inbox repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a shared inbox group by ID.
    pub async fn find_by_id(&self, id: SharedInboxGroupId) -> AppResult<Option<SharedInboxGroup>> {
        sqlx::query_as::<_, SharedInboxGroup>(
            "SELECT id, inbox_group_name, email_address, is_automatic, is_enabled, \
             mail_provider_credential_id, mail_provider_id, last_sync_time, disabled_time, \
             email_signature FROM shared_inbox_groups WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find inbox group", e))
    }

    /// Status allocations of one mailbox, in workflow order.
    pub async fn find_status_allocations(
        &self,
        id: SharedInboxGroupId,
    ) -> AppResult<Vec<TicketStatusAllocation>> {
        sqlx::query_as::<_, TicketStatusAllocation>(
            "SELECT * FROM ticket_status_allocations \
             WHERE shared_inbox_group_id = $1 ORDER BY sort_order ASC, id ASC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list status allocations", e)
        })
    }
}
