//! Domain entities representing core business objects.

pub mod audit;
pub mod user;
pub mod verification;

// Re-export commonly used types
pub use audit::{AuditEvent, UserMgmtEvent, DEFAULT_AUDIT_SOURCE};
pub use user::{User, UserStatus};
pub use verification::{classify, AuditContext, VerificationOutcome};
