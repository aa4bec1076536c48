//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::{User, UserStatus};
use crate::errors::DomainError;

use super::UserRepository;

/// In-memory user repository for testing
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
    update_calls: AtomicUsize,
    fail_updates: AtomicBool,
}

impl MockUserRepository {
    /// Create an empty mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            update_calls: AtomicUsize::new(0),
            fail_updates: AtomicBool::new(false),
        }
    }

    /// Create a mock repository seeded with users
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let map = users.into_iter().map(|u| (u.id, u)).collect();
        Self {
            users: Arc::new(RwLock::new(map)),
            ..Self::new()
        }
    }

    /// Insert or replace a user without counting it as a write
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    /// Fetch a stored user by internal id
    pub async fn get(&self, id: Uuid) -> Option<User> {
        self.users.read().await.get(&id).cloned()
    }

    /// Number of write calls received (activations and reverts)
    pub fn update_count(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    /// Make subsequent writes fail with an internal error
    pub fn set_fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    fn record_write(&self) -> Result<(), DomainError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "Mock repository error".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email_and_app_id(
        &self,
        email: &str,
        app_id: &str,
    ) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email) && u.app_id == app_id)
            .cloned())
    }

    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.user_id == user_id).cloned())
    }

    async fn activate_pending(
        &self,
        pending: &User,
        activated_at: DateTime<Utc>,
    ) -> Result<Option<User>, DomainError> {
        self.record_write()?;

        let mut users = self.users.write().await;
        let Some(stored) = users.get_mut(&pending.id) else {
            return Ok(None);
        };
        if stored.status != UserStatus::PendingConfirmation
            || stored.email_code.is_none()
            || stored.email_code != pending.email_code
        {
            return Ok(None);
        }

        stored.activate(activated_at);
        Ok(Some(stored.clone()))
    }

    async fn revert_activation(&self, pending: &User) -> Result<bool, DomainError> {
        self.record_write()?;

        let mut users = self.users.write().await;
        match users.get_mut(&pending.id) {
            Some(stored) if stored.status == UserStatus::Active && stored.email_code.is_none() => {
                *stored = pending.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str, app_id: &str) -> User {
        User::new(format!("uid-{}", email), email, Uuid::new_v4(), app_id)
    }

    #[tokio::test]
    async fn test_lookup_is_scoped_to_application() {
        let repo = MockUserRepository::with_users(vec![
            user("jane@example.com", "app-1"),
            user("jane@example.com", "app-2"),
        ]);

        let found = repo
            .find_by_email_and_app_id("JANE@example.com", "app-2")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.app_id, "app-2");

        let missing = repo
            .find_by_email_and_app_id("jane@example.com", "app-3")
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_activation_consumes_code_once() {
        let pending = user("jane@example.com", "app-1")
            .with_verification_code("123456", Utc::now() + chrono::Duration::minutes(5));
        let repo = MockUserRepository::with_users(vec![pending.clone()]);

        let first = repo.activate_pending(&pending, Utc::now()).await.unwrap();
        let activated = first.unwrap();
        assert!(activated.is_active());
        assert!(activated.email_code.is_none());

        // A second request that read the same pending row loses the race
        let second = repo.activate_pending(&pending, Utc::now()).await.unwrap();
        assert!(second.is_none());
        assert_eq!(repo.update_count(), 2);
    }

    #[tokio::test]
    async fn test_activation_requires_matching_stored_code() {
        let pending = user("jane@example.com", "app-1")
            .with_verification_code("123456", Utc::now() + chrono::Duration::minutes(5));
        let repo = MockUserRepository::with_users(vec![pending
            .clone()
            .with_verification_code("654321", Utc::now() + chrono::Duration::minutes(5))]);

        assert!(repo.activate_pending(&pending, Utc::now()).await.unwrap().is_none());
        assert!(repo
            .activate_pending(&user("ghost@example.com", "app-1"), Utc::now())
            .await
            .unwrap()
            .is_none());
        assert!(!repo.get(pending.id).await.unwrap().is_active());
    }

    #[tokio::test]
    async fn test_revert_restores_pending_state() {
        let pending = user("jane@example.com", "app-1")
            .with_verification_code("123456", Utc::now() + chrono::Duration::minutes(5));
        let repo = MockUserRepository::with_users(vec![pending.clone()]);

        assert!(!repo.revert_activation(&pending).await.unwrap());

        repo.activate_pending(&pending, Utc::now()).await.unwrap();
        assert!(repo.revert_activation(&pending).await.unwrap());
        assert_eq!(repo.get(pending.id).await, Some(pending));
    }

    #[tokio::test]
    async fn test_failed_writes_are_counted() {
        let pending = user("jane@example.com", "app-1");
        let repo = MockUserRepository::with_users(vec![pending.clone()]);
        repo.set_fail_updates(true);

        let result = repo.activate_pending(&pending, Utc::now()).await;
        assert!(matches!(result, Err(DomainError::Internal { .. })));
        assert_eq!(repo.update_count(), 1);
    }

    #[tokio::test]
    async fn test_find_by_user_id() {
        let stored = user("jane@example.com", "app-1");
        let repo = MockUserRepository::with_users(vec![stored.clone()]);
        let found = repo.find_by_user_id(&stored.user_id).await.unwrap();
        assert_eq!(found, Some(stored));
    }
}
