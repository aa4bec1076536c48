//! User entity representing an account registered with one of the managed applications.

use chrono::{DateTime, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a user account
///
/// The numeric codes are shared with the identity service and the
/// `user_details.status` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    /// Email verified, account usable
    Active,
    /// Registered, waiting for the email verification code
    PendingConfirmation,
    /// Disabled by an administrator
    Deactivated,
}

impl UserStatus {
    /// Numeric status code used in storage and on the wire
    pub fn code(&self) -> i16 {
        match self {
            UserStatus::Active => 1,
            UserStatus::PendingConfirmation => 2,
            UserStatus::Deactivated => 3,
        }
    }

    /// Parse a numeric status code
    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            1 => Some(UserStatus::Active),
            2 => Some(UserStatus::PendingConfirmation),
            3 => Some(UserStatus::Deactivated),
            _ => None,
        }
    }
}

/// User entity as stored in `user_details`, joined with its owning application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Internal identifier
    pub id: Uuid,

    /// Identifier shared with the identity service
    pub user_id: String,

    /// Email address the account was registered with
    pub email: String,

    /// Pending email verification code, cleared once used
    #[serde(skip_serializing)]
    pub email_code: Option<String>,

    /// When the pending verification code stops being accepted
    pub code_expires_at: Option<DateTime<Utc>>,

    /// Account status
    pub status: UserStatus,

    /// Internal identifier of the owning application record
    pub app_info_id: Uuid,

    /// Public identifier of the owning application (`appId` header)
    pub app_id: String,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,

    /// Timestamp when the email address was verified
    pub email_verified_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a user waiting for email confirmation
    pub fn new(
        user_id: impl Into<String>,
        email: impl Into<String>,
        app_info_id: Uuid,
        app_id: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            email: email.into(),
            email_code: None,
            code_expires_at: None,
            status: UserStatus::PendingConfirmation,
            app_info_id,
            app_id: app_id.into(),
            created_at: now,
            updated_at: now,
            email_verified_at: None,
        }
    }

    /// Attach a pending verification code
    pub fn with_verification_code(
        mut self,
        code: impl Into<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        self.email_code = Some(code.into());
        self.code_expires_at = Some(expires_at);
        self
    }

    /// Checks if the account is active
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// Compares a submitted code against the stored one in constant time
    ///
    /// Always false when no code is pending.
    pub fn code_matches(&self, submitted: &str) -> bool {
        match &self.email_code {
            Some(stored) => constant_time_eq(stored.as_bytes(), submitted.as_bytes()),
            None => false,
        }
    }

    /// Checks if the pending code is no longer accepted at `now`
    ///
    /// A code without an expiry is treated as expired.
    pub fn is_code_expired(&self, now: DateTime<Utc>) -> bool {
        match self.code_expires_at {
            Some(expires_at) => expires_at <= now,
            None => true,
        }
    }

    /// Marks the account active and consumes the verification code
    pub fn activate(&mut self, now: DateTime<Utc>) {
        self.status = UserStatus::Active;
        self.email_code = None;
        self.code_expires_at = None;
        self.email_verified_at = Some(now);
        self.updated_at = now;
    }
}
