use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /verifyEmailId`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyEmailRequest {
    /// Code received by email
    #[validate(length(min = 1, max = 64, message = "Verification code is required"))]
    pub code: String,

    /// Email address the account was registered with
    #[serde(rename = "emailId")]
    #[validate(email(message = "Invalid email address"))]
    pub email_id: String,
}

/// Body returned when the email is verified
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyEmailResponse {
    pub verified: bool,
}
