//! Audit event entity for recording account lifecycle events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Source recorded on events when none is configured
pub const DEFAULT_AUDIT_SOURCE: &str = "USER MANAGEMENT SERVICE";

/// Account lifecycle events emitted by the user management service
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum UserMgmtEvent {
    #[serde(rename = "USER_EMAIL_VERIFIED_FOR_ACCOUNT_ACTIVATION")]
    EmailVerifiedForAccountActivation,

    #[serde(rename = "USER_ACCOUNT_ACTIVATED")]
    AccountActivated,

    #[serde(rename = "ACCOUNT_ACTIVATION_USER_EMAIL_VERIFICATION_FAILED_WRONG_CODE")]
    EmailVerificationFailedWrongCode,

    #[serde(rename = "ACCOUNT_ACTIVATION_USER_EMAIL_VERIFICATION_FAILED_EXPIRED_CODE")]
    EmailVerificationFailedExpiredCode,

    #[serde(rename = "ACCOUNT_ACTIVATION_USER_EMAIL_VERIFICATION_FAILED")]
    EmailVerificationFailed,
}

impl UserMgmtEvent {
    /// Event code used in storage and by downstream consumers
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmailVerifiedForAccountActivation => "USER_EMAIL_VERIFIED_FOR_ACCOUNT_ACTIVATION",
            Self::AccountActivated => "USER_ACCOUNT_ACTIVATED",
            Self::EmailVerificationFailedWrongCode => {
                "ACCOUNT_ACTIVATION_USER_EMAIL_VERIFICATION_FAILED_WRONG_CODE"
            }
            Self::EmailVerificationFailedExpiredCode => {
                "ACCOUNT_ACTIVATION_USER_EMAIL_VERIFICATION_FAILED_EXPIRED_CODE"
            }
            Self::EmailVerificationFailed => "ACCOUNT_ACTIVATION_USER_EMAIL_VERIFICATION_FAILED",
        }
    }

    /// Default human readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::EmailVerifiedForAccountActivation => "User email verified for account activation",
            Self::AccountActivated => "User account activated",
            Self::EmailVerificationFailedWrongCode => {
                "Account activation email verification failed: wrong code"
            }
            Self::EmailVerificationFailedExpiredCode => {
                "Account activation email verification failed: expired code"
            }
            Self::EmailVerificationFailed => {
                "Account activation email verification failed: email not registered"
            }
        }
    }
}

impl std::fmt::Display for UserMgmtEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserMgmtEvent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER_EMAIL_VERIFIED_FOR_ACCOUNT_ACTIVATION" => Ok(Self::EmailVerifiedForAccountActivation),
            "USER_ACCOUNT_ACTIVATED" => Ok(Self::AccountActivated),
            "ACCOUNT_ACTIVATION_USER_EMAIL_VERIFICATION_FAILED_WRONG_CODE" => {
                Ok(Self::EmailVerificationFailedWrongCode)
            }
            "ACCOUNT_ACTIVATION_USER_EMAIL_VERIFICATION_FAILED_EXPIRED_CODE" => {
                Ok(Self::EmailVerificationFailedExpiredCode)
            }
            "ACCOUNT_ACTIVATION_USER_EMAIL_VERIFICATION_FAILED" => Ok(Self::EmailVerificationFailed),
            _ => Err(format!("Unknown audit event code: {}", s)),
        }
    }
}

/// Append-only audit record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuditEvent {
    /// Unique identifier for the event
    pub id: Uuid,

    /// What happened
    pub event: UserMgmtEvent,

    /// External user id the event concerns, when known
    pub user_id: Option<String>,

    /// Public application identifier
    pub app_id: Option<String>,

    /// Organisation identifier, when supplied by the caller
    pub org_id: Option<String>,

    /// Service emitting the event
    pub source: String,

    /// System affected by the event
    pub destination: Option<String>,

    /// Human readable description
    pub description: String,

    /// Request correlation id
    pub correlation_id: Option<String>,

    /// Client IP address of the triggering request
    pub client_ip: Option<String>,

    /// Timestamp when the event occurred
    pub occurred_at: DateTime<Utc>,
}

impl AuditEvent {
    /// Create a new audit event with the default description and source
    pub fn new(event: UserMgmtEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            event,
            user_id: None,
            app_id: None,
            org_id: None,
            source: DEFAULT_AUDIT_SOURCE.to_string(),
            destination: None,
            description: event.description().to_string(),
            correlation_id: None,
            client_ip: None,
            occurred_at: Utc::now(),
        }
    }

    /// Event code for storage
    pub fn event_code(&self) -> &'static str {
        self.event.as_str()
    }

    /// Add user context
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Add application and organisation context
    pub fn with_application(mut self, app_id: impl Into<String>, org_id: Option<String>) -> Self {
        self.app_id = Some(app_id.into());
        self.org_id = org_id;
        self
    }

    /// Add request context (correlation id and client IP)
    pub fn with_request_context(
        mut self,
        correlation_id: Option<String>,
        client_ip: Option<String>,
    ) -> Self {
        self.correlation_id = correlation_id;
        self.client_ip = client_ip;
        self
    }

    /// Override the emitting service name
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Set the affected system
    pub fn with_destination(mut self, destination: impl Into<String>) -> Self {
        self.destination = Some(destination.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_EVENTS: [UserMgmtEvent; 5] = [
        UserMgmtEvent::EmailVerifiedForAccountActivation,
        UserMgmtEvent::AccountActivated,
        UserMgmtEvent::EmailVerificationFailedWrongCode,
        UserMgmtEvent::EmailVerificationFailedExpiredCode,
        UserMgmtEvent::EmailVerificationFailed,
    ];

    #[test]
    fn test_event_codes_parse_back() {
        for event in ALL_EVENTS {
            assert_eq!(event.as_str().parse::<UserMgmtEvent>(), Ok(event));
        }
        assert!("LOGIN_SUCCESS".parse::<UserMgmtEvent>().is_err());
    }

    #[test]
    fn test_serde_uses_event_code() {
        let json = serde_json::to_string(&UserMgmtEvent::AccountActivated).unwrap();
        assert_eq!(json, "\"USER_ACCOUNT_ACTIVATED\"");
    }

    #[test]
    fn test_builder_sets_context() {
        let event = AuditEvent::new(UserMgmtEvent::EmailVerificationFailedWrongCode)
            .with_user("user-7")
            .with_application("app-1", Some("org-9".to_string()))
            .with_request_context(Some("req-1".to_string()), Some("10.0.0.1".to_string()))
            .with_destination("USER DATASTORE");

        assert_eq!(
            event.event_code(),
            "ACCOUNT_ACTIVATION_USER_EMAIL_VERIFICATION_FAILED_WRONG_CODE"
        );
        assert_eq!(event.user_id.as_deref(), Some("user-7"));
        assert_eq!(event.app_id.as_deref(), Some("app-1"));
        assert_eq!(event.org_id.as_deref(), Some("org-9"));
        assert_eq!(event.correlation_id.as_deref(), Some("req-1"));
        assert_eq!(event.client_ip.as_deref(), Some("10.0.0.1"));
        assert_eq!(event.source, DEFAULT_AUDIT_SOURCE);
        assert_eq!(
            event.description,
            UserMgmtEvent::EmailVerificationFailedWrongCode.description()
        );
    }
}
