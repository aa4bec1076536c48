//! User repository trait defining the interface for user data persistence.
//!
//! The trait is async-first and keeps the storage layer behind the domain
//! boundary; the MySQL implementation lives in the infrastructure crate.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find the user registered with `email` for the application `app_id`
    ///
    /// # Arguments
    /// * `email` - Email address, already trimmed; matched case-insensitively
    /// * `app_id` - Public application identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user registered with this email for the application
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_email_and_app_id(
        &self,
        email: &str,
        app_id: &str,
    ) -> Result<Option<User>, DomainError>;

    /// Find a user by the identifier shared with the identity service
    async fn find_by_user_id(&self, user_id: &str) -> Result<Option<User>, DomainError>;

    /// Activate a user that is still pending with the code it was read with
    ///
    /// Compare-and-set on the stored status and code: the write only happens
    /// while the row is pending and its code equals `pending.email_code`, so
    /// a code is consumed by at most one request.
    ///
    /// # Returns
    /// * `Ok(Some(User))` - This call activated the user; the activated record
    /// * `Ok(None)` - The row was already activated or its code changed
    /// * `Err(DomainError)` - Database or other error occurred
    async fn activate_pending(
        &self,
        pending: &User,
        activated_at: DateTime<Utc>,
    ) -> Result<Option<User>, DomainError>;

    /// Put a user activated by `activate_pending` back into `pending`'s state
    ///
    /// Only applies while the row is still active without a code. Returns
    /// whether a row was restored.
    async fn revert_activation(&self, pending: &User) -> Result<bool, DomainError>;
}
