//! PostgreSQL-backed ticket store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, warn};

use helpdesk_core::error::{AppError, ErrorKind};
use helpdesk_core::result::AppResult;
use helpdesk_core::types::{CustomerId, EmailThreadId, SharedInboxGroupId, TicketId, UserId};
use helpdesk_entity::archive::{ArchiveSnapshot, ArchivedTicket};
use helpdesk_entity::customer::{Customer, PriorityLevelRule};
use helpdesk_entity::email::{EmailThread, ThreadBundle};
use helpdesk_entity::inbox::TicketStatusAllocation;
use helpdesk_entity::ticket::{CreateTicket, Ticket};
use helpdesk_entity::user::User;

use super::{ArchiveCommit, TicketStore};
use crate::repositories::{
    ArchiveRepository, CustomerRepository, EmailRepository, InboxRepository, TicketRepository,
    UserRepository,
};

/// [`TicketStore`] over PostgreSQL.
///
/// Plain mutations are single conditional `UPDATE` statements. Archival
/// runs in one transaction that holds the ticket row lock from the version
/// check until commit.
#[derive(Debug, Clone)]
pub struct PgTicketStore {
    pool: PgPool,
    tickets: TicketRepository,
    emails: EmailRepository,
    inboxes: InboxRepository,
    customers: CustomerRepository,
    users: UserRepository,
    archive: ArchiveRepository,
}

impl PgTicketStore {
    /// Create a store over `pool`.
    pub fn new(pool: PgPool) -> Self {
        Self {
            tickets: TicketRepository::new(pool.clone()),
            emails: EmailRepository::new(pool.clone()),
            inboxes: InboxRepository::new(pool.clone()),
            customers: CustomerRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            archive: ArchiveRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl TicketStore for PgTicketStore {
    async fn find_ticket(&self, id: TicketId) -> AppResult<Option<Ticket>> {
        self.tickets.find_by_id(id).await
    }

    async fn insert_ticket(&self, data: &CreateTicket) -> AppResult<Ticket> {
        self.tickets.create(data).await
    }

    async fn update_ticket(&self, ticket: &Ticket) -> AppResult<Option<Ticket>> {
        self.tickets.update(ticket).await
    }

    async fn find_thread(&self, id: EmailThreadId) -> AppResult<Option<EmailThread>> {
        self.emails.find_thread(id).await
    }

    async fn load_thread(&self, id: EmailThreadId) -> AppResult<Option<ThreadBundle>> {
        let Some(thread) = self.emails.find_thread(id).await? else {
            return Ok(None);
        };

        let inbox = self
            .inboxes
            .find_by_id(thread.shared_inbox_group_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "Inbox group {} of thread {} not found",
                    thread.shared_inbox_group_id, thread.id
                ))
            })?;
        let emails = self.emails.find_by_thread(id).await?;
        let attachments = self.emails.find_attachments_by_thread(id).await?;

        debug!(
            thread_id = %id,
            emails = emails.len(),
            attachments = attachments.len(),
            "Loaded thread"
        );

        Ok(Some(ThreadBundle {
            thread,
            inbox,
            emails,
            attachments,
        }))
    }

    async fn commit_archive(
        &self,
        ticket: &Ticket,
        snapshot: &ArchiveSnapshot,
    ) -> AppResult<Option<ArchiveCommit>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin archive transaction", e)
        })?;

        let Some(locked) = TicketRepository::lock(&mut *tx, ticket.id).await? else {
            return Ok(None);
        };
        if locked.version != ticket.version || locked.is_archived {
            debug!(
                ticket_id = %ticket.id,
                expected_version = ticket.version,
                stored_version = locked.version,
                "Archive lost version race"
            );
            return Ok(None);
        }

        ArchiveRepository::insert_thread(&mut *tx, &snapshot.thread).await?;

        let archived = match ArchiveRepository::insert_ticket(&mut *tx, &snapshot.ticket).await {
            Ok(archived) => archived,
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                warn!(ticket_id = %ticket.id, "Snapshot already exists for ticket");
                return Ok(None);
            }
            Err(e) => {
                return Err(AppError::with_source(
                    ErrorKind::Database,
                    "Failed to insert archived ticket",
                    e,
                ));
            }
        };

        let Some(updated) = TicketRepository::update_versioned(&mut *tx, ticket).await? else {
            return Ok(None);
        };

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit archive transaction", e)
        })?;

        Ok(Some(ArchiveCommit {
            ticket: updated,
            archived,
        }))
    }

    async fn find_archived(&self, original_id: TicketId) -> AppResult<Vec<ArchivedTicket>> {
        self.archive.find_by_original(original_id).await
    }

    async fn count_archived(&self, original_id: TicketId) -> AppResult<u64> {
        self.archive.count_by_original(original_id).await
    }

    async fn find_user(&self, id: UserId) -> AppResult<Option<User>> {
        self.users.find_by_id(id).await
    }

    async fn find_customer(&self, id: CustomerId) -> AppResult<Option<Customer>> {
        self.customers.find_by_id(id).await
    }

    async fn find_priority_rules(&self) -> AppResult<Vec<PriorityLevelRule>> {
        self.customers.find_priority_rules().await
    }

    async fn find_status_allocations(
        &self,
        inbox_id: SharedInboxGroupId,
    ) -> AppResult<Vec<TicketStatusAllocation>> {
        self.inboxes.find_status_allocations(inbox_id).await
    }

    async fn find_archivable(
        &self,
        completed_before: DateTime<Utc>,
        limit: u32,
    ) -> AppResult<Vec<TicketId>> {
        self.tickets.find_archivable(completed_before, limit).await
    }
}
