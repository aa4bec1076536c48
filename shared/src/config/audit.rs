//! Audit logging configuration

use serde::{Deserialize, Serialize};

/// Audit event emission settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Write audit events on a background task instead of inline
    pub async_writes: bool,

    /// Name recorded as the source of every event
    pub source: String,

    /// Name recorded as the destination of account events
    pub destination: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            async_writes: true,
            source: String::from("USER MANAGEMENT SERVICE"),
            destination: String::from("USER DATASTORE"),
        }
    }
}

impl AuditConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            async_writes: std::env::var("AUDIT_ASYNC_WRITES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.async_writes),
            source: std::env::var("AUDIT_SOURCE").unwrap_or(defaults.source),
            destination: std::env::var("AUDIT_DESTINATION").unwrap_or(defaults.destination),
        }
    }
}
