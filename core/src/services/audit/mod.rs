//! Audit service module for recording account lifecycle events.

mod service;

pub use service::{AuditService, AuditServiceConfig};
