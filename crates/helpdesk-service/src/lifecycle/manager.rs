//! Ticket lifecycle manager.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use helpdesk_core::config::LifecycleConfig;
use helpdesk_core::error::AppError;
use helpdesk_core::result::AppResult;
use helpdesk_core::traits::Clock;
use helpdesk_core::types::{
    CustomerId, EmailThreadId, PriorityLevelId, TicketId, TicketStatusId, UserId,
};
use helpdesk_database::store::{ArchiveCommit, TicketStore};
use helpdesk_entity::inbox::StatusWorkflow;
use helpdesk_entity::ticket::{CreateTicket, Ticket};

use super::snapshot;
use crate::context::RequestContext;
use crate::priority::PriorityResolver;

/// Request to open a ticket for an email thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenTicketRequest {
    /// The thread the ticket tracks.
    pub email_thread_id: EmailThreadId,
    /// The customer, if known.
    pub customer_id: Option<CustomerId>,
    /// Explicit priority. Resolved from the customer's rules when absent.
    pub priority_level_id: Option<PriorityLevelId>,
    /// Explicit status. The inbox's first enabled status when absent.
    pub ticket_status_id: Option<TicketStatusId>,
    /// Initial assignee.
    pub assigned_to: Option<UserId>,
}

/// Outcome of one archive sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveSweepSummary {
    /// Tickets selected for archival.
    pub candidates: usize,
    /// Tickets archived by this sweep.
    pub archived: usize,
    /// Tickets whose state no longer allowed archival when reached.
    pub skipped: usize,
    /// Tickets that failed with a storage or consistency error.
    pub failed: usize,
}

/// Enforces ticket state transitions against a [`TicketStore`].
///
/// Each transition reads the ticket, validates the move, and writes the
/// next value conditioned on the version it read. When another writer got
/// there first the ticket is reloaded and the transition re-validated, up
/// to `max_conflict_retries` times. Storage errors are returned unchanged
/// and never retried.
#[derive(Clone)]
pub struct LifecycleManager {
    /// Ticket storage.
    store: Arc<dyn TicketStore>,
    /// Source of transition timestamps.
    clock: Arc<dyn Clock>,
    /// Lifecycle settings.
    config: LifecycleConfig,
    /// Default priority resolution.
    priority: PriorityResolver,
}

impl fmt::Debug for LifecycleManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleManager")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl LifecycleManager {
    /// Creates a new lifecycle manager.
    pub fn new(store: Arc<dyn TicketStore>, clock: Arc<dyn Clock>, config: LifecycleConfig) -> Self {
        let priority = PriorityResolver::new(PriorityLevelId(config.default_priority_level_id));
        Self {
            store,
            clock,
            config,
            priority,
        }
    }

    /// Reads a ticket by id.
    pub async fn get(&self, id: TicketId) -> AppResult<Ticket> {
        self.store
            .find_ticket(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Ticket {id} not found")))
    }

    /// Opens a new `Active` ticket for an email thread.
    pub async fn open_ticket(
        &self,
        ctx: &RequestContext,
        req: OpenTicketRequest,
    ) -> AppResult<Ticket> {
        let thread = self
            .store
            .find_thread(req.email_thread_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Email thread {} not found", req.email_thread_id))
            })?;

        self.ensure_user(ctx.user_id).await?;
        if let Some(assignee) = req.assigned_to {
            self.ensure_user(assignee).await?;
        }

        let customer = match req.customer_id {
            Some(id) => Some(
                self.store
                    .find_customer(id)
                    .await?
                    .ok_or_else(|| AppError::not_found(format!("Customer {id} not found")))?,
            ),
            None => None,
        };

        let priority_level_id = match req.priority_level_id {
            Some(level) => level,
            None => {
                let rules = self.store.find_priority_rules().await?;
                self.priority.resolve(customer.as_ref(), &rules)
            }
        };

        let workflow = StatusWorkflow::new(
            self.store
                .find_status_allocations(thread.shared_inbox_group_id)
                .await?,
        );
        let ticket_status_id = match req.ticket_status_id {
            Some(status) if workflow.allows(status) => status,
            Some(status) => {
                return Err(AppError::validation(format!(
                    "Status {status} is not enabled for inbox {}",
                    thread.shared_inbox_group_id
                )));
            }
            None => workflow.initial().ok_or_else(|| {
                AppError::validation(format!(
                    "Inbox {} has no enabled ticket statuses",
                    thread.shared_inbox_group_id
                ))
            })?,
        };

        let data = CreateTicket {
            created_date: self.clock.now(),
            received_date: thread.received_date,
            email_thread_id: thread.id,
            customer_id: req.customer_id,
            priority_level_id,
            ticket_status_id,
            created_by: Some(ctx.user_id),
            assigned_to: req.assigned_to,
        };

        let ticket = self.store.insert_ticket(&data).await?;

        info!(
            user_id = %ctx.user_id,
            ticket_id = %ticket.id,
            thread_id = %thread.id,
            priority_level_id = %ticket.priority_level_id,
            "Ticket opened"
        );

        Ok(ticket)
    }

    /// Sets or clears the assignee. Fails with `InvalidState` if archived.
    pub async fn assign(
        &self,
        ctx: &RequestContext,
        id: TicketId,
        assignee: Option<UserId>,
    ) -> AppResult<Ticket> {
        if let Some(user_id) = assignee {
            self.ensure_user(user_id).await?;
        }

        let ticket = self
            .transition(id, "assign", |current, _| {
                current.state.ensure_not_archived("assign")?;
                Ok(Ticket {
                    assigned_to: assignee,
                    ..current.clone()
                })
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            ticket_id = %id,
            assigned_to = ?ticket.assigned_to,
            "Ticket assigned"
        );

        Ok(ticket)
    }

    /// Moves the ticket to another status of its inbox's workflow.
    ///
    /// Fails with `InvalidState` if the ticket is deleted or archived and
    /// with `Validation` if the status is not enabled for the inbox.
    pub async fn change_status(
        &self,
        ctx: &RequestContext,
        id: TicketId,
        status: TicketStatusId,
    ) -> AppResult<Ticket> {
        let current = self.get(id).await?;
        ensure_editable(&current, "change the status of")?;

        let thread = self
            .store
            .find_thread(current.email_thread_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "Email thread {} of ticket {id} not found",
                    current.email_thread_id
                ))
            })?;
        let workflow = StatusWorkflow::new(
            self.store
                .find_status_allocations(thread.shared_inbox_group_id)
                .await?,
        );
        if !workflow.allows(status) {
            return Err(AppError::validation(format!(
                "Status {status} is not enabled for inbox {}",
                thread.shared_inbox_group_id
            )));
        }

        let ticket = self
            .transition(id, "change status", |current, _| {
                ensure_editable(current, "change the status of")?;
                Ok(Ticket {
                    ticket_status_id: status,
                    ..current.clone()
                })
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            ticket_id = %id,
            status_id = %status,
            "Ticket status changed"
        );

        Ok(ticket)
    }

    /// `Active → Completed`, stamped with the current time.
    pub async fn complete(&self, ctx: &RequestContext, id: TicketId) -> AppResult<Ticket> {
        let ticket = self
            .transition(id, "complete", |current, now| {
                Ok(current.with_state(current.state.complete(now)?))
            })
            .await?;

        info!(user_id = %ctx.user_id, ticket_id = %id, "Ticket completed");
        Ok(ticket)
    }

    /// Soft-deletes the ticket on behalf of the acting user.
    ///
    /// Fails with `AlreadyDeleted` if deleted and `InvalidState` if archived.
    pub async fn soft_delete(&self, ctx: &RequestContext, id: TicketId) -> AppResult<Ticket> {
        let acting_user = ctx.user_id;
        self.ensure_user(acting_user).await?;

        let ticket = self
            .transition(id, "delete", |current, now| {
                Ok(current.with_state(current.state.soft_delete(acting_user, now)?))
            })
            .await?;

        info!(user_id = %ctx.user_id, ticket_id = %id, "Ticket deleted");
        Ok(ticket)
    }

    /// Undoes a soft delete, returning the ticket to the state it was
    /// deleted from. Fails with `NotDeleted` otherwise.
    pub async fn restore(&self, ctx: &RequestContext, id: TicketId) -> AppResult<Ticket> {
        let ticket = self
            .transition(id, "restore", |current, _| {
                Ok(current.with_state(current.state.restore()?))
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            ticket_id = %id,
            state = %ticket.state.kind(),
            "Ticket restored"
        );
        Ok(ticket)
    }

    /// Archives the ticket.
    ///
    /// The snapshot rows and the archived live ticket are written in one
    /// atomic commit. Fails with `AlreadyArchived` if the ticket is already
    /// archived, including when a concurrent call archived it first.
    pub async fn archive(&self, id: TicketId) -> AppResult<ArchiveCommit> {
        for attempt in 0..=self.config.max_conflict_retries {
            let current = self.get(id).await?;
            let now = self.clock.now();
            let next = current.with_state(current.state.archive(now)?);

            let bundle = self
                .store
                .load_thread(current.email_thread_id)
                .await?
                .ok_or_else(|| {
                    AppError::not_found(format!(
                        "Email thread {} of ticket {id} not found",
                        current.email_thread_id
                    ))
                })?;
            let snapshot = snapshot::build(&next, &bundle, now);

            if let Some(commit) = self.store.commit_archive(&next, &snapshot).await? {
                info!(
                    ticket_id = %id,
                    archived_id = %commit.archived.id,
                    emails = commit.archived.emails.len(),
                    attachments = commit.archived.email_attachments.len(),
                    "Ticket archived"
                );
                return Ok(commit);
            }

            warn!(ticket_id = %id, attempt, "Archive conflicted with a concurrent write");
        }

        Err(self.exhausted(id, "archive"))
    }

    /// IDs of tickets `archive_completed_before` would pick up.
    pub async fn find_archivable(
        &self,
        cutoff: DateTime<Utc>,
        limit: u32,
    ) -> AppResult<Vec<TicketId>> {
        self.store.find_archivable(cutoff, limit).await
    }

    /// Archives up to `limit` completed tickets finished before `cutoff`,
    /// oldest first.
    ///
    /// A ticket that fails does not stop the sweep; it is logged and
    /// counted in the summary.
    pub async fn archive_completed_before(
        &self,
        cutoff: DateTime<Utc>,
        limit: u32,
    ) -> AppResult<ArchiveSweepSummary> {
        let candidates = self.store.find_archivable(cutoff, limit).await?;
        let mut summary = ArchiveSweepSummary {
            candidates: candidates.len(),
            ..ArchiveSweepSummary::default()
        };

        for id in candidates {
            match self.archive(id).await {
                Ok(_) => summary.archived += 1,
                Err(e) if e.kind.is_lifecycle() => {
                    warn!(ticket_id = %id, error = %e, "Skipping ticket in archive sweep");
                    summary.skipped += 1;
                }
                Err(e) => {
                    error!(ticket_id = %id, error = %e, "Failed to archive ticket");
                    summary.failed += 1;
                }
            }
        }

        info!(
            cutoff = %cutoff,
            candidates = summary.candidates,
            archived = summary.archived,
            skipped = summary.skipped,
            failed = summary.failed,
            "Archive sweep finished"
        );

        Ok(summary)
    }

    /// Read, validate, and conditionally write until the write lands or
    /// the retry budget is spent.
    async fn transition<F>(&self, id: TicketId, action: &str, apply: F) -> AppResult<Ticket>
    where
        F: Fn(&Ticket, DateTime<Utc>) -> AppResult<Ticket>,
    {
        for attempt in 0..=self.config.max_conflict_retries {
            let current = self.get(id).await?;
            let next = apply(&current, self.clock.now())?;

            if let Some(stored) = self.store.update_ticket(&next).await? {
                return Ok(stored);
            }

            warn!(ticket_id = %id, action, attempt, "Ticket changed concurrently, retrying");
        }

        Err(self.exhausted(id, action))
    }

    fn exhausted(&self, id: TicketId, action: &str) -> AppError {
        AppError::conflict(format!(
            "Could not {action} ticket {id} after {} conflicting writes",
            self.config.max_conflict_retries.saturating_add(1)
        ))
    }

    async fn ensure_user(&self, id: UserId) -> AppResult<()> {
        match self.store.find_user(id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(format!("User {id} not found"))),
        }
    }
}

fn ensure_editable(ticket: &Ticket, action: &str) -> AppResult<()> {
    ticket.state.ensure_not_archived(action)?;
    if ticket.state.is_deleted() {
        return Err(AppError::invalid_state(format!(
            "Cannot {action} a deleted ticket"
        )));
    }
    Ok(())
}
