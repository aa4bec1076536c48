//! Error types for the email verification workflow and the identity service seam

use thiserror::Error;

/// Client-visible outcomes of a rejected email verification
///
/// Wrong and expired codes share one message and error code; only the audit
/// trail tells them apart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationError {
    #[error("Invalid code")]
    WrongCode,

    #[error("Invalid code")]
    ExpiredCode,

    #[error("Email Doesn't Exist")]
    EmailNotFound,
}

impl VerificationError {
    /// Stable identifier for programmatic handling by API clients
    pub fn error_code(&self) -> &'static str {
        match self {
            VerificationError::WrongCode | VerificationError::ExpiredCode => "INVALID_CODE",
            VerificationError::EmailNotFound => "EMAIL_NOT_FOUND",
        }
    }
}

/// Failures talking to the external identity service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Identity service unavailable: {message}")]
    Unavailable { message: String },

    #[error("Identity service returned status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },

    #[error("Invalid identity service response: {message}")]
    InvalidResponse { message: String },
}
