//! Email verification workflow for account activation
//!
//! Checks a submitted code against the pending user record, activates the
//! account on success, propagates the new status to the identity service,
//! and records an audit event for every outcome.

mod service;
mod types;


pub use service::EmailVerificationService;
pub use types::VerifyEmailResult;
