//! No-op implementation of AuditEventRepository for deployments without audit storage

use async_trait::async_trait;

use super::AuditEventRepository;
use crate::domain::entities::audit::AuditEvent;
use crate::errors::DomainError;

/// Audit repository that discards every event
///
/// Events still reach the tracing output through the audit service.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpAuditEventRepository;

impl NoOpAuditEventRepository {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AuditEventRepository for NoOpAuditEventRepository {
    async fn create(&self, _event: &AuditEvent) -> Result<(), DomainError> {
        Ok(())
    }

    async fn find_by_user(
        &self,
        _user_id: &str,
        _limit: usize,
    ) -> Result<Vec<AuditEvent>, DomainError> {
        Ok(Vec::new())
    }
}
