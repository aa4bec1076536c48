//! Audit event repository trait defining the interface for audit persistence.

use async_trait::async_trait;

use crate::domain::entities::audit::AuditEvent;
use crate::errors::DomainError;

/// Repository trait for append-only audit event storage
///
/// Implementations should keep writes cheap; the audit service may call
/// `create` from a background task while the request continues.
#[async_trait]
pub trait AuditEventRepository: Send + Sync {
    /// Append a new audit event
    ///
    /// # Returns
    /// * `Ok(())` on successful creation
    /// * `Err(DomainError)` if the operation fails
    async fn create(&self, event: &AuditEvent) -> Result<(), DomainError>;

    /// Find events concerning a user
    ///
    /// # Arguments
    /// * `user_id` - External user id the events were recorded for
    /// * `limit` - Maximum number of records to return
    ///
    /// # Returns
    /// * Events for the user, newest first
    async fn find_by_user(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<AuditEvent>, DomainError>;
}
