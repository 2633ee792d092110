//! Builds the rows written by one archival.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use helpdesk_core::types::EmailId;
use helpdesk_entity::archive::{
    ArchiveSnapshot, ArchivedEmail, ArchivedEmailAttachment, NewArchivedEmailThread,
    NewArchivedTicket,
};
use helpdesk_entity::email::{Email, ThreadBundle};
use helpdesk_entity::ticket::Ticket;

/// Denormalize `ticket` and its thread into archive rows.
///
/// `ticket` carries the state it will be stored with. Emails are ordered by
/// ascending `received_date` with ties broken by ascending id, so two
/// messages delivered in the same instant always archive in the same order.
/// Attachments are ordered by ascending id, both per email and in the
/// flattened list.
pub fn build(ticket: &Ticket, bundle: &ThreadBundle, archived_at: DateTime<Utc>) -> ArchiveSnapshot {
    let mut emails: Vec<&Email> = bundle.emails.iter().collect();
    emails.sort_by(|a, b| {
        a.received_date
            .cmp(&b.received_date)
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut attachments: Vec<ArchivedEmailAttachment> = bundle
        .attachments
        .iter()
        .map(ArchivedEmailAttachment::from)
        .collect();
    attachments.sort_by_key(|a| a.id);

    let mut by_email: BTreeMap<EmailId, Vec<ArchivedEmailAttachment>> = BTreeMap::new();
    for attachment in &attachments {
        by_email
            .entry(attachment.email_id)
            .or_default()
            .push(attachment.clone());
    }

    let archived_emails = emails
        .into_iter()
        .map(|email| ArchivedEmail::capture(email, by_email.remove(&email.id).unwrap_or_default()))
        .collect();

    let thread = &bundle.thread;
    let inbox = &bundle.inbox;

    ArchiveSnapshot {
        ticket: NewArchivedTicket {
            original_id: ticket.id,
            created_date: ticket.created_date,
            received_date: ticket.received_date,
            email_thread_id: thread.id,
            email_thread_subject: thread.subject_line.clone(),
            email_thread_received_from: thread.received_from.clone(),
            email_thread_provider_thread_id: thread.provider_thread_id.clone(),
            email_thread_provider_thread_topic: thread.provider_thread_topic.clone(),
            created_by_id: ticket.created_by,
            ticket_status_id: ticket.ticket_status_id,
            assigned_to_id: ticket.assigned_to,
            priority_level_id: ticket.priority_level_id,
            completed_date: ticket.state.completed_at(),
            customer_id: ticket.customer_id,
            archived_date: archived_at,
            emails: archived_emails,
            email_attachments: attachments,
            shared_inbox_group_id: inbox.id,
            inbox_group_name: inbox.inbox_group_name.clone(),
            mailbox_email_address: inbox.email_address.clone(),
        },
        thread: NewArchivedEmailThread::capture(thread, archived_at),
    }
}
