//! Business services containing domain logic and use cases.

pub mod audit;
pub mod identity;
pub mod verification;

// Re-export commonly used types
pub use audit::{AuditService, AuditServiceConfig};
pub use identity::{IdentityService, MockIdentityService, TokenIntrospection};
pub use verification::{EmailVerificationService, VerifyEmailResult};
