//! Types for verification service results

/// Result of a successful email verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyEmailResult {
    /// Always true; failures are returned as errors
    pub verified: bool,
    /// External id of the verified user
    pub user_id: String,
    /// The account had been activated by an earlier request
    pub already_active: bool,
}

impl VerifyEmailResult {
    pub(crate) fn activated(user_id: impl Into<String>) -> Self {
        Self {
            verified: true,
            user_id: user_id.into(),
            already_active: false,
        }
    }

    pub(crate) fn already_active(user_id: impl Into<String>) -> Self {
        Self {
            verified: true,
            user_id: user_id.into(),
            already_active: true,
        }
    }
}
