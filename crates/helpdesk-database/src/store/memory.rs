//! In-memory ticket store using a Tokio mutex for single-node deployments
//! and tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info};

use helpdesk_core::error::AppError;
use helpdesk_core::result::AppResult;
use helpdesk_core::types::{
    ArchivedEmailThreadId, ArchivedTicketId, CustomerId, EmailThreadId, SharedInboxGroupId,
    TicketId, UserId,
};
use helpdesk_entity::archive::{ArchiveSnapshot, ArchivedEmailThread, ArchivedTicket};
use helpdesk_entity::customer::{Customer, PriorityLevelRule};
use helpdesk_entity::email::{Email, EmailAttachment, EmailThread, ThreadBundle};
use helpdesk_entity::inbox::{SharedInboxGroup, TicketStatusAllocation};
use helpdesk_entity::ticket::{CreateTicket, Ticket, TicketState};
use helpdesk_entity::user::User;

use super::{ArchiveCommit, TicketStore};

#[derive(Debug, Default)]
struct InnerState {
    tickets: BTreeMap<TicketId, Ticket>,
    threads: HashMap<EmailThreadId, EmailThread>,
    inboxes: HashMap<SharedInboxGroupId, SharedInboxGroup>,
    emails: Vec<Email>,
    attachments: Vec<EmailAttachment>,
    users: HashMap<UserId, User>,
    customers: HashMap<CustomerId, Customer>,
    priority_rules: Vec<PriorityLevelRule>,
    status_allocations: Vec<TicketStatusAllocation>,
    archived_tickets: Vec<ArchivedTicket>,
    archived_threads: Vec<ArchivedEmailThread>,
    next_ticket_id: i64,
    unavailable: bool,
}

impl InnerState {
    fn ensure_available(&self) -> AppResult<()> {
        if self.unavailable {
            return Err(AppError::database("Ticket store is unavailable"));
        }
        Ok(())
    }

    fn apply_versioned(&mut self, ticket: &Ticket) -> Option<Ticket> {
        let stored = self.tickets.get_mut(&ticket.id)?;
        if stored.version != ticket.version {
            return None;
        }
        let mut next = ticket.clone();
        next.version += 1;
        *stored = next.clone();
        Some(next)
    }
}

/// In-memory [`TicketStore`].
///
/// Every operation runs under one mutex, so archival is trivially atomic
/// and concurrent writers to the same ticket are serialised.
#[derive(Debug, Clone, Default)]
pub struct MemoryTicketStore {
    state: Arc<Mutex<InnerState>>,
}

impl MemoryTicketStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a mailbox.
    pub async fn add_inbox(&self, inbox: SharedInboxGroup) {
        self.state.lock().await.inboxes.insert(inbox.id, inbox);
    }

    /// Adds a thread.
    pub async fn add_thread(&self, thread: EmailThread) {
        self.state.lock().await.threads.insert(thread.id, thread);
    }

    /// Adds an email.
    pub async fn add_email(&self, email: Email) {
        self.state.lock().await.emails.push(email);
    }

    /// Adds an attachment.
    pub async fn add_attachment(&self, attachment: EmailAttachment) {
        self.state.lock().await.attachments.push(attachment);
    }

    /// Adds a user.
    pub async fn add_user(&self, user: User) {
        self.state.lock().await.users.insert(user.id, user);
    }

    /// Adds a customer.
    pub async fn add_customer(&self, customer: Customer) {
        self.state.lock().await.customers.insert(customer.id, customer);
    }

    /// Adds a priority rule.
    pub async fn add_priority_rule(&self, rule: PriorityLevelRule) {
        self.state.lock().await.priority_rules.push(rule);
    }

    /// Adds a status allocation.
    pub async fn add_status_allocation(&self, allocation: TicketStatusAllocation) {
        self.state.lock().await.status_allocations.push(allocation);
    }

    /// Stores `ticket` as-is, replacing any ticket with the same id.
    pub async fn put_ticket(&self, ticket: Ticket) {
        let mut state = self.state.lock().await;
        state.next_ticket_id = state.next_ticket_id.max(ticket.id.get());
        state.tickets.insert(ticket.id, ticket);
    }

    /// Makes every subsequent write fail with a database error until reset.
    pub async fn set_unavailable(&self, unavailable: bool) {
        self.state.lock().await.unavailable = unavailable;
        info!(unavailable, "Memory ticket store availability changed");
    }

    /// Thread snapshots taken of the given live thread.
    pub async fn archived_threads(&self, original_id: EmailThreadId) -> Vec<ArchivedEmailThread> {
        self.state
            .lock()
            .await
            .archived_threads
            .iter()
            .filter(|t| t.original_id == original_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl TicketStore for MemoryTicketStore {
    async fn find_ticket(&self, id: TicketId) -> AppResult<Option<Ticket>> {
        Ok(self.state.lock().await.tickets.get(&id).cloned())
    }

    async fn insert_ticket(&self, data: &CreateTicket) -> AppResult<Ticket> {
        let mut state = self.state.lock().await;
        state.ensure_available()?;

        state.next_ticket_id += 1;
        let ticket = data.clone().into_ticket(TicketId(state.next_ticket_id));
        state.tickets.insert(ticket.id, ticket.clone());
        Ok(ticket)
    }

    async fn update_ticket(&self, ticket: &Ticket) -> AppResult<Option<Ticket>> {
        let mut state = self.state.lock().await;
        state.ensure_available()?;
        Ok(state.apply_versioned(ticket))
    }

    async fn find_thread(&self, id: EmailThreadId) -> AppResult<Option<EmailThread>> {
        Ok(self.state.lock().await.threads.get(&id).cloned())
    }

    async fn load_thread(&self, id: EmailThreadId) -> AppResult<Option<ThreadBundle>> {
        let state = self.state.lock().await;
        let Some(thread) = state.threads.get(&id).cloned() else {
            return Ok(None);
        };
        let inbox = state
            .inboxes
            .get(&thread.shared_inbox_group_id)
            .cloned()
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "Inbox group {} of thread {} not found",
                    thread.shared_inbox_group_id, thread.id
                ))
            })?;

        let emails: Vec<Email> = state
            .emails
            .iter()
            .filter(|e| e.email_thread_id == id)
            .cloned()
            .collect();
        let attachments = state
            .attachments
            .iter()
            .filter(|a| emails.iter().any(|e| e.id == a.email_id))
            .cloned()
            .collect();

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
        let mut state = self.state.lock().await;
        state.ensure_available()?;

        let current = match state.tickets.get(&ticket.id) {
            Some(current) => current,
            None => return Ok(None),
        };
        if current.version != ticket.version || current.state.is_archived() {
            debug!(ticket_id = %ticket.id, "Archive lost version race");
            return Ok(None);
        }
        if state
            .archived_tickets
            .iter()
            .any(|a| a.original_id == ticket.id)
        {
            return Ok(None);
        }

        let thread_id = ArchivedEmailThreadId(state.archived_threads.len() as i64 + 1);
        let archived_thread = snapshot.thread.clone().into_row(thread_id);
        let archived_id = ArchivedTicketId(state.archived_tickets.len() as i64 + 1);
        let archived = snapshot.ticket.clone().into_row(archived_id);

        let Some(updated) = state.apply_versioned(ticket) else {
            return Ok(None);
        };
        state.archived_threads.push(archived_thread);
        state.archived_tickets.push(archived.clone());

        Ok(Some(ArchiveCommit {
            ticket: updated,
            archived,
        }))
    }

    async fn find_archived(&self, original_id: TicketId) -> AppResult<Vec<ArchivedTicket>> {
        Ok(self
            .state
            .lock()
            .await
            .archived_tickets
            .iter()
            .filter(|a| a.original_id == original_id)
            .cloned()
            .collect())
    }

    async fn count_archived(&self, original_id: TicketId) -> AppResult<u64> {
        Ok(self
            .state
            .lock()
            .await
            .archived_tickets
            .iter()
            .filter(|a| a.original_id == original_id)
            .count() as u64)
    }

    async fn find_user(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.state.lock().await.users.get(&id).cloned())
    }

    async fn find_customer(&self, id: CustomerId) -> AppResult<Option<Customer>> {
        Ok(self.state.lock().await.customers.get(&id).cloned())
    }

    async fn find_priority_rules(&self) -> AppResult<Vec<PriorityLevelRule>> {
        Ok(self.state.lock().await.priority_rules.clone())
    }

    async fn find_status_allocations(
        &self,
        inbox_id: SharedInboxGroupId,
    ) -> AppResult<Vec<TicketStatusAllocation>> {
        Ok(self
            .state
            .lock()
            .await
            .status_allocations
            .iter()
            .filter(|a| a.shared_inbox_group_id == inbox_id)
            .cloned()
            .collect())
    }

    async fn find_archivable(
        &self,
        completed_before: DateTime<Utc>,
        limit: u32,
    ) -> AppResult<Vec<TicketId>> {
        let state = self.state.lock().await;
        let mut candidates: Vec<(DateTime<Utc>, TicketId)> = state
            .tickets
            .values()
            .filter_map(|t| match t.state {
                TicketState::Completed { completed_at }
                    if completed_at < completed_before =>
                {
                    Some((completed_at, t.id))
                }
                _ => None,
            })
            .collect();
        candidates.sort();

        Ok(candidates
            .into_iter()
            .take(limit as usize)
            .map(|(_, id)| id)
            .collect())
    }
}
