//! Email verification request context and outcome classification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::user::{User, UserStatus};

/// Request metadata carried into audit events
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditContext {
    /// Public application identifier (`appId` header)
    pub app_id: String,

    /// Organisation identifier (`orgId` header)
    pub org_id: Option<String>,

    /// Caller supplied user id (`userId` header)
    pub caller_user_id: Option<String>,

    /// Request correlation id
    pub correlation_id: Option<String>,

    /// Client IP address
    pub client_ip: Option<String>,
}

impl AuditContext {
    /// Create a context for the given application
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            ..Default::default()
        }
    }

    /// Set the organisation identifier
    pub fn with_org_id(mut self, org_id: Option<String>) -> Self {
        self.org_id = org_id;
        self
    }

    /// Set the caller supplied user id
    pub fn with_caller_user_id(mut self, user_id: Option<String>) -> Self {
        self.caller_user_id = user_id;
        self
    }

    /// Set correlation id and client IP
    pub fn with_request(mut self, correlation_id: Option<String>, client_ip: Option<String>) -> Self {
        self.correlation_id = correlation_id;
        self.client_ip = client_ip;
        self
    }
}

/// Result of checking a submitted code against the stored user record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// Code matches and is still valid
    Verified,
    /// Account was activated earlier; nothing to do
    AlreadyActive,
    /// No pending code, the submitted code differs, or the account is
    /// deactivated
    WrongCode,
    /// Code matches but its expiry has passed
    ExpiredCode,
    /// No user registered with this email for the application
    UnknownEmail,
}

impl VerificationOutcome {
    /// Whether the caller should see a successful verification
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Verified | Self::AlreadyActive)
    }
}

/// Decide the outcome of a verification attempt
///
/// Checks run in a fixed order: unknown email, already active, code
/// mismatch, then expiry. A wrong code is reported as such even when the
/// stored code has also expired. Only pending accounts can be activated.
pub fn classify(user: Option<&User>, submitted_code: &str, now: DateTime<Utc>) -> VerificationOutcome {
    let Some(user) = user else {
        return VerificationOutcome::UnknownEmail;
    };

    if user.is_active() {
        return VerificationOutcome::AlreadyActive;
    }

    if user.status != UserStatus::PendingConfirmation || !user.code_matches(submitted_code) {
        return VerificationOutcome::WrongCode;
    }

    if user.is_code_expired(now) {
        return VerificationOutcome::ExpiredCode;
    }

    VerificationOutcome::Verified
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn user_with_code(code: &str, expires_in: Duration) -> User {
        User::new("user-1", "jane@example.com", Uuid::new_v4(), "app-1")
            .with_verification_code(code, Utc::now() + expires_in)
    }

    #[test]
    fn test_unknown_email() {
        assert_eq!(classify(None, "123456", Utc::now()), VerificationOutcome::UnknownEmail);
    }

    #[test]
    fn test_valid_code() {
        let user = user_with_code("123456", Duration::minutes(10));
        assert_eq!(
            classify(Some(&user), "123456", Utc::now()),
            VerificationOutcome::Verified
        );
    }

    #[test]
    fn test_wrong_code_wins_over_expiry() {
        let user = user_with_code("123456", Duration::minutes(-10));
        assert_eq!(
            classify(Some(&user), "000000", Utc::now()),
            VerificationOutcome::WrongCode
        );
    }

    #[test]
    fn test_expired_code() {
        let user = user_with_code("123456", Duration::minutes(-10));
        assert_eq!(
            classify(Some(&user), "123456", Utc::now()),
            VerificationOutcome::ExpiredCode
        );
    }

    #[test]
    fn test_missing_code_is_wrong_code() {
        let user = User::new("user-1", "jane@example.com", Uuid::new_v4(), "app-1");
        assert_eq!(classify(Some(&user), "", Utc::now()), VerificationOutcome::WrongCode);
    }

    #[test]
    fn test_active_user_short_circuits() {
        let mut user = user_with_code("123456", Duration::minutes(-10));
        user.status = UserStatus::Active;
        let outcome = classify(Some(&user), "anything", Utc::now());
        assert_eq!(outcome, VerificationOutcome::AlreadyActive);
        assert!(outcome.is_success());
    }

    #[test]
    fn test_deactivated_user_cannot_be_activated() {
        let mut user = user_with_code("123456", Duration::minutes(10));
        user.status = UserStatus::Deactivated;
        assert_eq!(
            classify(Some(&user), "123456", Utc::now()),
            VerificationOutcome::WrongCode
        );
    }

    #[test]
    fn test_audit_context_builder() {
        let ctx = AuditContext::new("app-1")
            .with_org_id(Some("org-1".to_string()))
            .with_caller_user_id(None)
            .with_request(Some("req-1".to_string()), None);
        assert_eq!(ctx.app_id, "app-1");
        assert_eq!(ctx.org_id.as_deref(), Some("org-1"));
        assert!(ctx.caller_user_id.is_none());
        assert_eq!(ctx.correlation_id.as_deref(), Some("req-1"));
    }
}
