//! The transactional storage interface behind the ticket lifecycle.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use helpdesk_core::result::AppResult;
use helpdesk_core::types::{CustomerId, EmailThreadId, SharedInboxGroupId, TicketId, UserId};
use helpdesk_entity::archive::{ArchiveSnapshot, ArchivedTicket};
use helpdesk_entity::customer::{Customer, PriorityLevelRule};
use helpdesk_entity::email::{EmailThread, ThreadBundle};
use helpdesk_entity::inbox::TicketStatusAllocation;
use helpdesk_entity::ticket::{CreateTicket, Ticket};
use helpdesk_entity::user::User;

pub use memory::MemoryTicketStore;
pub use postgres::PgTicketStore;

/// Rows produced by a successful archival commit.
#[derive(Debug, Clone)]
pub struct ArchiveCommit {
    /// The live ticket in its archived state, with its new version.
    pub ticket: Ticket,
    /// The stored snapshot.
    pub archived: ArchivedTicket,
}

/// Storage operations the lifecycle manager relies on.
///
/// Writes are conditional on the ticket's `version`: the caller passes the
/// next value of the ticket carrying the version it read, and the store
/// applies it only if the stored version still matches, incrementing the
/// version as part of the write. A lost race is reported as `Ok(None)`;
/// storage faults are reported as `Err` and never retried here.
#[async_trait]
pub trait TicketStore: Send + Sync + 'static {
    /// Read a ticket by id.
    async fn find_ticket(&self, id: TicketId) -> AppResult<Option<Ticket>>;

    /// Insert a new ticket in the `Active` state.
    async fn insert_ticket(&self, data: &CreateTicket) -> AppResult<Ticket>;

    /// Conditionally replace a ticket. Returns the stored ticket with its
    /// bumped version, or `None` if the version no longer matches.
    async fn update_ticket(&self, ticket: &Ticket) -> AppResult<Option<Ticket>>;

    /// Read a thread without its emails.
    async fn find_thread(&self, id: EmailThreadId) -> AppResult<Option<EmailThread>>;

    /// Read a thread with its inbox, emails, and attachments.
    async fn load_thread(&self, id: EmailThreadId) -> AppResult<Option<ThreadBundle>>;

    /// Atomically write the snapshot rows and the archived ticket.
    ///
    /// Either every row lands or none does. Returns `None` if the ticket's
    /// version no longer matches or a snapshot already exists for it.
    async fn commit_archive(
        &self,
        ticket: &Ticket,
        snapshot: &ArchiveSnapshot,
    ) -> AppResult<Option<ArchiveCommit>>;

    /// All snapshots taken of the given live ticket.
    async fn find_archived(&self, original_id: TicketId) -> AppResult<Vec<ArchivedTicket>>;

    /// Number of snapshots taken of the given live ticket.
    async fn count_archived(&self, original_id: TicketId) -> AppResult<u64>;

    /// Read a user by id.
    async fn find_user(&self, id: UserId) -> AppResult<Option<User>>;

    /// Read a customer by id.
    async fn find_customer(&self, id: CustomerId) -> AppResult<Option<Customer>>;

    /// All priority level rules.
    async fn find_priority_rules(&self) -> AppResult<Vec<PriorityLevelRule>>;

    /// The status allocations of one mailbox.
    async fn find_status_allocations(
        &self,
        inbox_id: SharedInboxGroupId,
    ) -> AppResult<Vec<TicketStatusAllocation>>;

    /// Completed, undeleted, unarchived tickets completed before `cutoff`,
    /// oldest first.
    async fn find_archivable(
        &self,
        completed_before: DateTime<Utc>,
        limit: u32,
    ) -> AppResult<Vec<TicketId>>;
}
