//! Domain-specific error types and error handling.

mod types;

pub use types::{IdentityError, VerificationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Verification(#[from] VerificationError),

    #[error(transparent)]
    Identity(#[from] IdentityError),
}

impl DomainError {
    /// Whether the error is caused by the caller rather than by this service
    /// or one of its collaborators
    pub fn is_client_error(&self) -> bool {
        matches!(self, DomainError::Verification(_))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_errors_bridge_transparently() {
        let error: DomainError = VerificationError::WrongCode.into();
        assert_eq!(error.to_string(), "Invalid code");
        assert!(error.is_client_error());
    }

    #[test]
    fn test_identity_errors_are_server_side() {
        let error: DomainError = IdentityError::UnexpectedStatus {
            status: 502,
            body: "bad gateway".to_string(),
        }
        .into();
        assert!(!error.is_client_error());
        assert!(error.to_string().contains("502"));
    }
}
