//! Tests for the in-memory and no-op audit repositories

use chrono::{Duration, Utc};

use crate::domain::entities::audit::{AuditEvent, UserMgmtEvent};
use crate::repositories::audit::{MockAuditEventRepository, NoOpAuditEventRepository};
use crate::repositories::AuditEventRepository;

#[tokio::test]
async fn test_mock_create_and_retrieve() {
    let repo = MockAuditEventRepository::new();

    let event = AuditEvent::new(UserMgmtEvent::AccountActivated)
        .with_user("user-1")
        .with_application("app-1", None);

    assert!(repo.create(&event).await.is_ok());

    let events = repo.get_all_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0], event);
    assert_eq!(repo.recorded_kinds(), vec![UserMgmtEvent::AccountActivated]);
}

#[tokio::test]
async fn test_mock_find_by_user_newest_first() {
    let repo = MockAuditEventRepository::new();

    let mut older = AuditEvent::new(UserMgmtEvent::EmailVerificationFailedWrongCode).with_user("user-1");
    older.occurred_at = Utc::now() - Duration::minutes(5);
    let newer = AuditEvent::new(UserMgmtEvent::AccountActivated).with_user("user-1");
    let other = AuditEvent::new(UserMgmtEvent::AccountActivated).with_user("user-2");

    for event in [&older, &newer, &other] {
        repo.create(event).await.unwrap();
    }

    let events = repo.find_by_user("user-1", 10).await.unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].id, newer.id);
    assert_eq!(events[1].id, older.id);

    let limited = repo.find_by_user("user-1", 1).await.unwrap();
    assert_eq!(limited.len(), 1);
}

#[tokio::test]
async fn test_mock_failure_mode() {
    let repo = MockAuditEventRepository::new();
    repo.set_should_fail(true);

    let event = AuditEvent::new(UserMgmtEvent::EmailVerificationFailed);
    assert!(repo.create(&event).await.is_err());
    assert!(repo.get_all_events().is_empty());

    repo.set_should_fail(false);
    assert!(repo.create(&event).await.is_ok());
    repo.clear();
    assert!(repo.get_all_events().is_empty());
}

#[tokio::test]
async fn test_noop_discards_events() {
    let repo = NoOpAuditEventRepository::new();
    let event = AuditEvent::new(UserMgmtEvent::AccountActivated).with_user("user-1");

    assert!(repo.create(&event).await.is_ok());
    assert!(repo.find_by_user("user-1", 10).await.unwrap().is_empty());
}
