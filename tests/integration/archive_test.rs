//! Integration tests for ticket archival and the archive sweep.

mod helpers;

use chrono::Duration;

use helpdesk_core::error::ErrorKind;
use helpdesk_core::types::{AttachmentId, EmailId, EmailThreadId};
use helpdesk_database::store::TicketStore;
use helpdesk_entity::ticket::{TicketState, TicketStateKind};

use helpers::{INBOX, THREAD, TestApp};

#[tokio::test]
async fn test_archive_twice_keeps_one_snapshot() {
    let app = TestApp::new().await;
    let ticket = app.open().await;

    let commit = app.manager.archive(ticket.id).await.unwrap();
    assert!(commit.ticket.state.is_archived());
    assert_eq!(commit.archived.original_id, ticket.id);

    let err = app.manager.archive(ticket.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::AlreadyArchived);
    assert_eq!(app.store.count_archived(ticket.id).await.unwrap(), 1);
    assert_eq!(app.store.archived_threads(THREAD).await.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_archive_has_one_winner() {
    let app = TestApp::new().await;
    app.add_email(1, THREAD, helpers::start()).await;
    let ticket = app.open().await;

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let manager = app.manager.clone();
            tokio::spawn(async move { manager.archive(ticket.id).await })
        })
        .collect();

    let mut archived = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => archived += 1,
            Err(e) => assert_eq!(e.kind, ErrorKind::AlreadyArchived),
        }
    }

    assert_eq!(archived, 1);
    assert_eq!(app.store.count_archived(ticket.id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_snapshot_orders_same_instant_emails_by_id() {
    let app = TestApp::new().await;
    let at = helpers::start() + Duration::minutes(1);
    app.add_email(5, THREAD, at).await;
    app.add_email(3, THREAD, at).await;
    app.add_email(8, THREAD, helpers::start()).await;
    let ticket = app.open().await;

    let commit = app.manager.archive(ticket.id).await.unwrap();
    assert_eq!(
        commit.archived.email_ids(),
        vec![EmailId(8), EmailId(3), EmailId(5)]
    );
}

#[tokio::test]
async fn test_snapshot_embeds_attachments_and_denormalized_thread() {
    let app = TestApp::new().await;
    app.add_email(1, THREAD, helpers::start()).await;
    app.add_email(2, THREAD, helpers::start() + Duration::hours(1)).await;
    app.add_attachment(30, 2).await;
    app.add_attachment(10, 1).await;
    app.add_attachment(20, 2).await;
    let ticket = app.open().await;
    let done = app.manager.complete(&app.ctx, ticket.id).await.unwrap();

    app.clock.advance(Duration::days(120));
    let commit = app.manager.archive(ticket.id).await.unwrap();
    let archived = &commit.archived;

    assert_eq!(archived.archived_date, helpers::start() + Duration::days(120));
    assert_eq!(archived.completed_date, done.state.completed_at());
    assert_eq!(archived.email_thread_subject, format!("Berth request {THREAD}"));
    assert_eq!(archived.email_thread_provider_thread_id, format!("prov-{THREAD}"));
    assert_eq!(archived.shared_inbox_group_id, INBOX);
    assert_eq!(archived.inbox_group_name, "Harbour Permits");
    assert_eq!(archived.mailbox_email_address, "permits@harbour.gov");

    let flat: Vec<AttachmentId> = archived.email_attachments.iter().map(|a| a.id).collect();
    assert_eq!(flat, vec![AttachmentId(10), AttachmentId(20), AttachmentId(30)]);
    assert_eq!(archived.emails[1].attachments.len(), 2);

    assert_eq!(
        commit.ticket.state,
        TicketState::Archived {
            archived_at: archived.archived_date,
            completed_at: done.state.completed_at(),
        }
    );
    assert_eq!(app.reload(ticket.id).await, commit.ticket);

    let stored = app.store.find_archived(ticket.id).await.unwrap();
    assert_eq!(stored, vec![commit.archived.clone()]);
}

#[tokio::test]
async fn test_failed_commit_leaves_no_partial_archive() {
    let app = TestApp::new().await;
    app.add_email(1, THREAD, helpers::start()).await;
    let ticket = app.open().await;

    app.store.set_unavailable(true).await;
    let err = app.manager.archive(ticket.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Database);

    assert_eq!(app.reload(ticket.id).await, ticket);
    assert_eq!(app.store.count_archived(ticket.id).await.unwrap(), 0);
    assert!(app.store.archived_threads(THREAD).await.is_empty());

    app.store.set_unavailable(false).await;
    app.manager.archive(ticket.id).await.unwrap();
    assert_eq!(app.store.count_archived(ticket.id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_archived_ticket_is_frozen() {
    let app = TestApp::new().await;
    let ticket = app.open().await;
    let commit = app.manager.archive(ticket.id).await.unwrap();

    let err = app.manager.complete(&app.ctx, ticket.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidState);
    let err = app.manager.soft_delete(&app.ctx, ticket.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidState);
    let err = app.manager.restore(&app.ctx, ticket.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotDeleted);

    assert_eq!(app.reload(ticket.id).await, commit.ticket);
}

#[tokio::test]
async fn test_archive_deleted_ticket() {
    let app = TestApp::new().await;
    let ticket = app.open().await;
    app.manager.soft_delete(&app.ctx, ticket.id).await.unwrap();

    let commit = app.manager.archive(ticket.id).await.unwrap();
    assert_eq!(commit.ticket.state.kind(), TicketStateKind::Archived);
    assert_eq!(commit.ticket.state.deleted_by(), None);
}

#[tokio::test]
async fn test_archive_without_thread_is_not_found() {
    let app = TestApp::new().await;
    let orphan = EmailThreadId(77);
    app.add_thread(orphan).await;
    let ticket = app.open_on(orphan).await;

    // Point the stored ticket at a thread that does not exist.
    let mut broken = ticket.clone();
    broken.email_thread_id = EmailThreadId(78);
    app.store.put_ticket(broken).await;

    let err = app.manager.archive(ticket.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(app.store.count_archived(ticket.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_sweep_archives_old_completed_tickets_oldest_first() {
    let app = TestApp::new().await;

    let oldest = app.open().await;
    app.manager.complete(&app.ctx, oldest.id).await.unwrap();

    app.clock.advance(Duration::days(1));
    let older = app.open().await;
    app.manager.complete(&app.ctx, older.id).await.unwrap();

    app.clock.advance(Duration::days(1));
    let recent = app.open().await;
    app.manager.complete(&app.ctx, recent.id).await.unwrap();

    let active = app.open().await;
    let deleted = app.open().await;
    app.manager.complete(&app.ctx, deleted.id).await.unwrap();
    app.manager.soft_delete(&app.ctx, deleted.id).await.unwrap();

    let cutoff = helpers::start() + Duration::hours(36);
    assert_eq!(
        app.manager.find_archivable(cutoff, 10).await.unwrap(),
        vec![oldest.id, older.id]
    );

    let summary = app.manager.archive_completed_before(cutoff, 1).await.unwrap();
    assert_eq!(summary.candidates, 1);
    assert_eq!(summary.archived, 1);
    assert!(app.reload(oldest.id).await.state.is_archived());
    assert!(!app.reload(older.id).await.state.is_archived());

    let summary = app.manager.archive_completed_before(cutoff, 10).await.unwrap();
    assert_eq!(summary.candidates, 1);
    assert_eq!(summary.archived, 1);
    assert_eq!(summary.failed, 0);

    for id in [recent.id, active.id, deleted.id] {
        assert!(!app.reload(id).await.state.is_archived());
    }
}

#[tokio::test]
async fn test_sweep_counts_failures_without_aborting() {
    let app = TestApp::new().await;
    let first = app.open().await;
    app.manager.complete(&app.ctx, first.id).await.unwrap();

    let orphan = EmailThreadId(90);
    app.add_thread(orphan).await;
    let broken = app.open_on(orphan).await;
    let broken = app.manager.complete(&app.ctx, broken.id).await.unwrap();
    let mut dangling = broken.clone();
    dangling.email_thread_id = EmailThreadId(91);
    app.store.put_ticket(dangling).await;

    app.clock.advance(Duration::days(1));
    let summary = app
        .manager
        .archive_completed_before(helpers::start() + Duration::days(1), 10)
        .await
        .unwrap();

    assert_eq!(summary.candidates, 2);
    assert_eq!(summary.archived, 1);
    assert_eq!(summary.failed, 1);
    assert!(app.reload(first.id).await.state.is_archived());
}
