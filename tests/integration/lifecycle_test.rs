//! Integration tests for ticket lifecycle transitions.

mod helpers;

use chrono::Duration;

use helpdesk_core::error::ErrorKind;
use helpdesk_core::types::{CustomerId, EmailThreadId, PriorityLevelId, TicketId, UserId};
use helpdesk_entity::ticket::{Ticket, TicketState};
use helpdesk_service::{OpenTicketRequest, RequestContext};

use helpers::{CUSTOMER, STATUS_NEW, STATUS_RETIRED, STATUS_WAITING, THREAD, TestApp};

fn request(customer: Option<CustomerId>) -> OpenTicketRequest {
    OpenTicketRequest {
        email_thread_id: THREAD,
        customer_id: customer,
        priority_level_id: None,
        ticket_status_id: None,
        assigned_to: None,
    }
}

#[tokio::test]
async fn test_open_ticket_routes_by_customer_and_workflow() {
    let app = TestApp::new().await;

    let ticket = app
        .manager
        .open_ticket(&app.ctx, request(Some(CUSTOMER)))
        .await
        .unwrap();

    assert_eq!(ticket.state, TicketState::Active);
    assert_eq!(ticket.created_date, helpers::start());
    assert_eq!(ticket.created_by, Some(app.ctx.user_id));
    assert_eq!(ticket.assigned_to, None);
    // The agency + domain rule is more specific than the domain-only one.
    assert_eq!(ticket.priority_level_id, PriorityLevelId(3));
    assert_eq!(ticket.ticket_status_id, STATUS_NEW);
}

#[tokio::test]
async fn test_open_ticket_without_customer_uses_default_priority() {
    let app = TestApp::new().await;
    let ticket = app.open().await;
    assert_eq!(ticket.priority_level_id, PriorityLevelId(1));
}

#[tokio::test]
async fn test_open_ticket_rejects_unknown_references() {
    let app = TestApp::new().await;

    let mut req = request(None);
    req.email_thread_id = EmailThreadId(404);
    let err = app.manager.open_ticket(&app.ctx, req).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    let err = app
        .manager
        .open_ticket(&app.ctx, request(Some(CustomerId(404))))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    let mut req = request(None);
    req.ticket_status_id = Some(STATUS_RETIRED);
    let err = app.manager.open_ticket(&app.ctx, req).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_complete_then_complete_again() {
    let app = TestApp::new().await;
    let ticket = app.open().await;

    app.clock.advance(Duration::hours(3));
    let done = app.manager.complete(&app.ctx, ticket.id).await.unwrap();
    let completed_at = helpers::start() + Duration::hours(3);
    assert_eq!(done.state, TicketState::Completed { completed_at });
    assert_eq!(done.state.completed_at(), Some(completed_at));

    let err = app.manager.complete(&app.ctx, ticket.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidState);
    assert_eq!(app.reload(ticket.id).await, done);
}

#[tokio::test]
async fn test_complete_rejects_deleted_ticket() {
    let app = TestApp::new().await;
    let ticket = app.open().await;
    app.manager.soft_delete(&app.ctx, ticket.id).await.unwrap();

    let err = app.manager.complete(&app.ctx, ticket.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidState);
}

#[tokio::test]
async fn test_soft_delete_records_actor_and_time() {
    let app = TestApp::new().await;
    let ticket = app.open().await;

    app.clock.advance(Duration::minutes(30));
    let deleted = app.manager.soft_delete(&app.ctx, ticket.id).await.unwrap();

    assert_eq!(
        deleted.state,
        TicketState::Deleted {
            deleted_by: app.ctx.user_id,
            deleted_at: helpers::start() + Duration::minutes(30),
            completed_at: None,
        }
    );

    let err = app
        .manager
        .soft_delete(&app.ctx, ticket.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::AlreadyDeleted);
}

#[tokio::test]
async fn test_delete_then_restore_returns_prior_state() {
    let app = TestApp::new().await;
    let ticket = app.open().await;

    app.manager.soft_delete(&app.ctx, ticket.id).await.unwrap();
    let restored = app.manager.restore(&app.ctx, ticket.id).await.unwrap();

    // Identical apart from the version counter.
    assert_eq!(restored.version, ticket.version + 2);
    assert_eq!(
        Ticket {
            version: ticket.version,
            ..restored
        },
        ticket
    );
}

#[tokio::test]
async fn test_restore_completed_ticket_keeps_completion_time() {
    let app = TestApp::new().await;
    let ticket = app.open().await;

    let done = app.manager.complete(&app.ctx, ticket.id).await.unwrap();
    app.clock.advance(Duration::days(2));
    app.manager.soft_delete(&app.ctx, ticket.id).await.unwrap();
    let restored = app.manager.restore(&app.ctx, ticket.id).await.unwrap();

    assert_eq!(restored.state, done.state);
}

#[tokio::test]
async fn test_restore_requires_deleted_ticket() {
    let app = TestApp::new().await;
    let ticket = app.open().await;

    let err = app.manager.restore(&app.ctx, ticket.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotDeleted);

    app.manager.complete(&app.ctx, ticket.id).await.unwrap();
    let err = app.manager.restore(&app.ctx, ticket.id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotDeleted);
}

#[tokio::test]
async fn test_assign_and_unassign() {
    let app = TestApp::new().await;
    let ticket = app.open().await;
    assert_eq!(ticket.assigned_to, None);

    let assigned = app
        .manager
        .assign(&app.ctx, ticket.id, Some(UserId(55)))
        .await
        .unwrap();
    assert_eq!(assigned.assigned_to, Some(UserId(55)));
    assert_eq!(assigned.state, TicketState::Active);

    let cleared = app.manager.assign(&app.ctx, ticket.id, None).await.unwrap();
    assert_eq!(cleared.assigned_to, None);
}

#[tokio::test]
async fn test_assign_unknown_user_is_not_found() {
    let app = TestApp::new().await;
    let ticket = app.open().await;

    let err = app
        .manager
        .assign(&app.ctx, ticket.id, Some(UserId(987_654)))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(app.reload(ticket.id).await, ticket);
}

#[tokio::test]
async fn test_soft_delete_by_unknown_user_is_not_found() {
    let app = TestApp::new().await;
    let ticket = app.open().await;

    let stranger = RequestContext::new(UserId(424_242), app.ctx.role_id);
    let err = app
        .manager
        .soft_delete(&stranger, ticket.id)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(app.reload(ticket.id).await.state, TicketState::Active);
}

#[tokio::test]
async fn test_open_ticket_rejects_unknown_assignee() {
    let app = TestApp::new().await;

    let mut req = request(None);
    req.assigned_to = Some(UserId(31_337));
    let err = app.manager.open_ticket(&app.ctx, req).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_assign_rejects_archived_ticket() {
    let app = TestApp::new().await;
    let ticket = app.open().await;
    app.manager.archive(ticket.id).await.unwrap();

    let err = app
        .manager
        .assign(&app.ctx, ticket.id, Some(UserId(55)))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidState);
}

#[tokio::test]
async fn test_change_status_follows_inbox_workflow() {
    let app = TestApp::new().await;
    let ticket = app.open().await;

    let moved = app
        .manager
        .change_status(&app.ctx, ticket.id, STATUS_WAITING)
        .await
        .unwrap();
    assert_eq!(moved.ticket_status_id, STATUS_WAITING);

    let err = app
        .manager
        .change_status(&app.ctx, ticket.id, STATUS_RETIRED)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    app.manager.soft_delete(&app.ctx, ticket.id).await.unwrap();
    let err = app
        .manager
        .change_status(&app.ctx, ticket.id, STATUS_NEW)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidState);
}

#[tokio::test]
async fn test_unknown_ticket_is_not_found() {
    let app = TestApp::new().await;
    let err = app
        .manager
        .complete(&app.ctx, TicketId(9_999))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_soft_delete_has_one_winner() {
    let app = TestApp::new().await;
    let ticket = app.open().await;

    let mut handles = Vec::new();
    for user in [UserId(1), UserId(2)] {
        let manager = app.manager.clone();
        let ctx = RequestContext::new(user, app.ctx.role_id);
        handles.push(tokio::spawn(async move {
            manager.soft_delete(&ctx, ticket.id).await
        }));
    }

    let mut winners = Vec::new();
    let mut losers = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(t) => winners.push(t),
            Err(e) => {
                assert_eq!(e.kind, ErrorKind::AlreadyDeleted);
                losers += 1;
            }
        }
    }

    assert_eq!(winners.len(), 1);
    assert_eq!(losers, 1);
    assert_eq!(app.reload(ticket.id).await, winners[0]);
}
