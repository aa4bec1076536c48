//! Repository interfaces and in-memory implementations.

pub mod audit;
pub mod user;

pub use audit::{AuditEventRepository, MockAuditEventRepository, NoOpAuditEventRepository};
pub use user::{MockUserRepository, UserRepository};
