//! Mock implementation of AuditEventRepository for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::entities::audit::{AuditEvent, UserMgmtEvent};
use crate::errors::DomainError;

use super::AuditEventRepository;

/// In-memory audit repository recording every event in insertion order
#[derive(Clone)]
pub struct MockAuditEventRepository {
    events: Arc<Mutex<Vec<AuditEvent>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockAuditEventRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Set whether operations should fail
    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap_or_else(|e| e.into_inner()) = should_fail;
    }

    /// Get all stored events in insertion order
    pub fn get_all_events(&self) -> Vec<AuditEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Event kinds in insertion order
    pub fn recorded_kinds(&self) -> Vec<UserMgmtEvent> {
        self.get_all_events().iter().map(|e| e.event).collect()
    }

    /// Clear all events
    pub fn clear(&self) {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        if *self.should_fail.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(DomainError::Internal {
                message: "Mock repository error".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockAuditEventRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditEventRepository for MockAuditEventRepository {
    async fn create(&self, event: &AuditEvent) -> Result<(), DomainError> {
        self.check_failure()?;

        let mut events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        events.push(event.clone());
        Ok(())
    }

    async fn find_by_user(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<AuditEvent>, DomainError> {
        self.check_failure()?;

        let events = self.events.lock().unwrap_or_else(|e| e.into_inner());
        let mut result: Vec<AuditEvent> = events
            .iter()
            .filter(|event| event.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect();

        result.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        result.truncate(limit);
        Ok(result)
    }
}
