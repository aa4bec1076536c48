//! Audit event repository module.

mod r#trait;
pub use r#trait::AuditEventRepository;

mod noop;
pub use noop::NoOpAuditEventRepository;

mod mock;
pub use mock::MockAuditEventRepository;

#[cfg(test)]
mod tests;
