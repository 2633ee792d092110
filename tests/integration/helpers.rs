//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use helpdesk_core::config::LifecycleConfig;
use helpdesk_core::traits::ManualClock;
use helpdesk_core::types::{
    AttachmentId, CustomerId, EmailId, EmailThreadId, MailProviderCredentialId, MailProviderId,
    PriorityLevelId, RoleId, SharedInboxGroupId, TicketId, TicketStatusId, UserId,
};
use helpdesk_database::store::MemoryTicketStore;
use helpdesk_entity::customer::{Customer, PriorityLevelRule};
use helpdesk_entity::email::{Email, EmailAttachment, EmailThread};
use helpdesk_entity::inbox::{SharedInboxGroup, TicketStatusAllocation};
use helpdesk_entity::ticket::Ticket;
use helpdesk_entity::user::User;
use helpdesk_service::{LifecycleManager, OpenTicketRequest, RequestContext};

/// The mailbox every seeded thread belongs to.
pub const INBOX: SharedInboxGroupId = SharedInboxGroupId(1);
/// The default seeded thread.
pub const THREAD: EmailThreadId = EmailThreadId(10);
/// A seeded customer matched by both priority rules.
pub const CUSTOMER: CustomerId = CustomerId(7);
/// Enabled statuses of [`INBOX`], in workflow order.
pub const STATUS_NEW: TicketStatusId = TicketStatusId(1);
pub const STATUS_WAITING: TicketStatusId = TicketStatusId(2);
/// Allocated to [`INBOX`] but disabled.
pub const STATUS_RETIRED: TicketStatusId = TicketStatusId(3);
/// The acting agent of [`TestApp::ctx`].
pub const AGENT: UserId = UserId(100);
/// Every seeded agent.
pub const AGENTS: [UserId; 4] = [AGENT, UserId(1), UserId(2), UserId(55)];

/// In-memory application fixture.
pub struct TestApp {
    /// Backing store, for seeding and direct assertions.
    pub store: MemoryTicketStore,
    /// Clock driving every transition timestamp.
    pub clock: ManualClock,
    /// The manager under test.
    pub manager: LifecycleManager,
    /// Acting agent.
    pub ctx: RequestContext,
}

impl TestApp {
    /// Create a fixture with one inbox, one thread, a customer, and its
    /// priority rules.
    pub async fn new() -> Self {
        let store = MemoryTicketStore::new();
        let clock = ManualClock::new(start());
        let manager = LifecycleManager::new(
            Arc::new(store.clone()),
            Arc::new(clock.clone()),
            LifecycleConfig::default(),
        );

        store
            .add_inbox(SharedInboxGroup {
                id: INBOX,
                inbox_group_name: "Harbour Permits".to_string(),
                email_address: "permits@harbour.gov".to_string(),
                is_automatic: true,
                is_enabled: true,
                mail_provider_credential_id: MailProviderCredentialId(1),
                mail_provider_id: MailProviderId(1),
                last_sync_time: None,
                disabled_time: None,
                email_signature: "Harbour Permits Desk".to_string(),
            })
            .await;

        for (id, status, sort_order, is_enabled) in [
            (1, STATUS_WAITING, 2, true),
            (2, STATUS_NEW, 1, true),
            (3, STATUS_RETIRED, 3, false),
        ] {
            store
                .add_status_allocation(TicketStatusAllocation {
                    id,
                    ticket_status_id: status,
                    shared_inbox_group_id: INBOX,
                    sort_order,
                    is_enabled,
                })
                .await;
        }

        store
            .add_customer(Customer {
                id: CUSTOMER,
                agency_name: "Port Authority".to_string(),
                email: "ops@harbour.gov".to_string(),
                email_domain: "Harbour.gov".to_string(),
                is_active: true,
                is_deleted: false,
            })
            .await;
        store
            .add_priority_rule(PriorityLevelRule {
                id: 1,
                agency_name: String::new(),
                email_domain: "harbour.gov".to_string(),
                priority_level_id: PriorityLevelId(2),
            })
            .await;
        store
            .add_priority_rule(PriorityLevelRule {
                id: 2,
                agency_name: "port authority".to_string(),
                email_domain: "@harbour.gov".to_string(),
                priority_level_id: PriorityLevelId(3),
            })
            .await;

        let app = Self {
            store,
            clock,
            manager,
            ctx: RequestContext::new(AGENT, RoleId(1)),
        };
        for id in AGENTS {
            app.add_user(id).await;
        }
        app.add_thread(THREAD).await;
        app
    }

    /// Seed an agent without a password.
    pub async fn add_user(&self, id: UserId) {
        self.store
            .add_user(User {
                id,
                first_name: "Agent".to_string(),
                last_name: id.to_string(),
                employee_id: 5_000 + id.get(),
                role_id: RoleId(1),
                password: None,
                email: format!("agent{id}@harbour.gov"),
                phone_number: String::new(),
                country: "NZ".to_string(),
                require_password_reset: false,
            })
            .await;
    }

    /// Seed a thread in [`INBOX`].
    pub async fn add_thread(&self, id: EmailThreadId) {
        self.store
            .add_thread(EmailThread {
                id,
                received_from: "captain@vessel.example".to_string(),
                subject_line: format!("Berth request {id}"),
                shared_inbox_group_id: INBOX,
                received_date: start(),
                provider_thread_id: format!("prov-{id}"),
                provider_thread_topic: "berthing".to_string(),
            })
            .await;
    }

    /// Seed an email on `thread`.
    pub async fn add_email(&self, id: i64, thread: EmailThreadId, received: DateTime<Utc>) {
        self.store
            .add_email(Email {
                id: EmailId(id),
                email_thread_id: thread,
                subject_line: format!("Message {id}"),
                body: format!("Body of message {id}"),
                to_address: "permits@harbour.gov".to_string(),
                from_address: "captain@vessel.example".to_string(),
                uri: format!("gs://mail/{id}.eml"),
                received_date: received,
                mail_provider_message_id: format!("msg-{id}"),
                gcs_folder: format!("threads/{thread}"),
                is_deleted: false,
            })
            .await;
    }

    /// Seed an attachment on email `email_id`.
    pub async fn add_attachment(&self, id: i64, email_id: i64) {
        self.store
            .add_attachment(EmailAttachment {
                id: AttachmentId(id),
                email_id: EmailId(email_id),
                uri: format!("gs://attachments/{id}"),
                filename: format!("manifest-{id}.pdf"),
                content_type: "application/pdf".to_string(),
                inline: false,
            })
            .await;
    }

    /// Open an unassigned ticket on [`THREAD`] with default routing.
    pub async fn open(&self) -> Ticket {
        self.open_on(THREAD).await
    }

    /// Open an unassigned ticket on `thread` with default routing.
    pub async fn open_on(&self, thread: EmailThreadId) -> Ticket {
        self.manager
            .open_ticket(
                &self.ctx,
                OpenTicketRequest {
                    email_thread_id: thread,
                    customer_id: None,
                    priority_level_id: None,
                    ticket_status_id: None,
                    assigned_to: None,
                },
            )
            .await
            .expect("Failed to open ticket")
    }

    /// Current stored value of a ticket.
    pub async fn reload(&self, id: TicketId) -> Ticket {
        self.manager.get(id).await.expect("Ticket should exist")
    }
}

/// Fixed start time of every fixture clock.
pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap()
}
