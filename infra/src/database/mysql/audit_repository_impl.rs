//! MySQL implementation of the AuditEventRepository trait.
//!
//! Events are appended to `audit_events` and never updated.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use um_core::domain::entities::audit::{AuditEvent, UserMgmtEvent};
use um_core::errors::DomainError;
use um_core::repositories::AuditEventRepository;

use super::column_error;

/// MySQL implementation of AuditEventRepository
pub struct MySqlAuditEventRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAuditEventRepository {
    /// Create a new MySQL audit event repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to AuditEvent entity
    fn row_to_audit_event(row: &sqlx::mysql::MySqlRow) -> Result<AuditEvent, DomainError> {
        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;
        let event_code: String = row
            .try_get("event_code")
            .map_err(|e| column_error("event_code", e))?;

        let event = event_code
            .parse::<UserMgmtEvent>()
            .map_err(|message| DomainError::Internal { message })?;

        Ok(AuditEvent {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid UUID: {}", e),
            })?,
            event,
            user_id: row.try_get("user_id").map_err(|e| column_error("user_id", e))?,
            app_id: row.try_get("app_id").map_err(|e| column_error("app_id", e))?,
            org_id: row.try_get("org_id").map_err(|e| column_error("org_id", e))?,
            source: row.try_get("source").map_err(|e| column_error("source", e))?,
            destination: row
                .try_get("destination")
                .map_err(|e| column_error("destination", e))?,
            description: row
                .try_get("description")
                .map_err(|e| column_error("description", e))?,
            correlation_id: row
                .try_get("correlation_id")
                .map_err(|e| column_error("correlation_id", e))?,
            client_ip: row
                .try_get("client_ip")
                .map_err(|e| column_error("client_ip", e))?,
            occurred_at: row
                .try_get::<DateTime<Utc>, _>("occurred_at")
                .map_err(|e| column_error("occurred_at", e))?,
        })
    }
}

#[async_trait]
impl AuditEventRepository for MySqlAuditEventRepository {
    async fn create(&self, event: &AuditEvent) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO audit_events (
                id, event_code, user_id, app_id, org_id, source, destination,
                description, correlation_id, client_ip, occurred_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(event.id.to_string())
            .bind(event.event_code())
            .bind(&event.user_id)
            .bind(&event.app_id)
            .bind(&event.org_id)
            .bind(&event.source)
            .bind(&event.destination)
            .bind(&event.description)
            .bind(&event.correlation_id)
            .bind(&event.client_ip)
            .bind(event.occurred_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to create audit event: {}", e),
            })?;

        Ok(())
    }

    async fn find_by_user(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<AuditEvent>, DomainError> {
        let query = r#"
            SELECT id, event_code, user_id, app_id, org_id, source, destination,
                   description, correlation_id, client_ip, occurred_at
            FROM audit_events
            WHERE user_id = ?
            ORDER BY occurred_at DESC
            LIMIT ?
        "#;

        let rows = sqlx::query(query)
            .bind(user_id)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to query audit events: {}", e),
            })?;

        rows.iter().map(Self::row_to_audit_event).collect()
    }
}
