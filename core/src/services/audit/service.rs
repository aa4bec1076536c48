//! Audit service for recording account lifecycle events.
//!
//! Writes go through an [`AuditEventRepository`]. By default they run on a
//! background task so a slow audit store never holds up the request.

use std::sync::Arc;
use tokio::task;

use um_shared::AuditConfig;

use crate::domain::entities::audit::{AuditEvent, UserMgmtEvent, DEFAULT_AUDIT_SOURCE};
use crate::domain::entities::verification::AuditContext;
use crate::errors::DomainResult;
use crate::repositories::AuditEventRepository;

/// Configuration for the audit service
#[derive(Debug, Clone)]
pub struct AuditServiceConfig {
    /// Whether to run audit writes asynchronously
    pub async_writes: bool,
    /// Name recorded as the emitting service
    pub source: String,
    /// Name recorded as the affected system
    pub destination: Option<String>,
}

impl Default for AuditServiceConfig {
    fn default() -> Self {
        Self {
            async_writes: true,
            source: DEFAULT_AUDIT_SOURCE.to_string(),
            destination: None,
        }
    }
}

impl From<&AuditConfig> for AuditServiceConfig {
    fn from(config: &AuditConfig) -> Self {
        Self {
            async_writes: config.async_writes,
            source: config.source.clone(),
            destination: Some(config.destination.clone()).filter(|d| !d.is_empty()),
        }
    }
}

/// Service for building and storing audit events
pub struct AuditService<R>
where
    R: AuditEventRepository,
{
    repository: Arc<R>,
    config: AuditServiceConfig,
}

impl<R> AuditService<R>
where
    R: AuditEventRepository + 'static,
{
    /// Create a new audit service
    pub fn new(repository: Arc<R>, config: AuditServiceConfig) -> Self {
        Self { repository, config }
    }

    /// Record an event for a request
    ///
    /// # Arguments
    /// * `event` - What happened
    /// * `user_id` - External user id the event concerns, if known
    /// * `context` - Application and request metadata
    pub async fn record(
        &self,
        event: UserMgmtEvent,
        user_id: Option<&str>,
        context: &AuditContext,
    ) -> DomainResult<()> {
        self.write_event(self.build_event(event, user_id, context)).await
    }

    /// Build the event without writing it
    pub fn build_event(
        &self,
        event: UserMgmtEvent,
        user_id: Option<&str>,
        context: &AuditContext,
    ) -> AuditEvent {
        let mut audit_event = AuditEvent::new(event)
            .with_source(self.config.source.clone())
            .with_application(context.app_id.clone(), context.org_id.clone())
            .with_request_context(context.correlation_id.clone(), context.client_ip.clone());

        if let Some(uid) = user_id {
            audit_event = audit_event.with_user(uid);
        }

        if let Some(destination) = &self.config.destination {
            audit_event = audit_event.with_destination(destination.clone());
        }

        audit_event
    }

    /// Get recent events for a user, newest first
    pub async fn get_user_events(
        &self,
        user_id: &str,
        limit: usize,
    ) -> DomainResult<Vec<AuditEvent>> {
        self.repository.find_by_user(user_id, limit).await
    }

    /// Internal method to write audit events
    ///
    /// With `async_writes` the write is spawned and failures are only logged.
    async fn write_event(&self, audit_event: AuditEvent) -> DomainResult<()> {
        tracing::info!(
            event_code = audit_event.event_code(),
            user_id = audit_event.user_id.as_deref().unwrap_or("-"),
            app_id = audit_event.app_id.as_deref().unwrap_or("-"),
            correlation_id = audit_event.correlation_id.as_deref().unwrap_or("-"),
            "audit event"
        );

        if self.config.async_writes {
            let repository = Arc::clone(&self.repository);

            task::spawn(async move {
                if let Err(e) = repository.create(&audit_event).await {
                    tracing::error!(
                        error = %e,
                        event_code = audit_event.event_code(),
                        "Failed to write audit event"
                    );
                }
            });

            Ok(())
        } else {
            self.repository.create(&audit_event).await
        }
    }
}
