use actix_web::{http::StatusCode, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// JSON body returned for every failed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// HTTP status code, repeated in the body for clients that only see JSON
    pub code: u16,

    /// Error identifier for client-side handling
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, serde_json::Value>>,

    /// Timestamp of when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(status: StatusCode, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: status.as_u16(),
            error: error.into(),
            message: message.into(),
            details: None,
            timestamp: Utc::now(),
        }
    }

    /// Create an error response with additional details
    pub fn with_details(mut self, details: HashMap<String, serde_json::Value>) -> Self {
        self.details = Some(details);
        self
    }

    /// Status code carried in the body
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn to_response(&self) -> HttpResponse {
        HttpResponse::build(self.status()).json(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_code_and_skips_empty_details() {
        let body = ErrorResponse::new(StatusCode::BAD_REQUEST, "INVALID_CODE", "Invalid code");
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["code"], 400);
        assert_eq!(json["error"], "INVALID_CODE");
        assert_eq!(json["message"], "Invalid code");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_response_uses_body_status() {
        let response = ErrorResponse::new(StatusCode::UNAUTHORIZED, "unauthorized", "Unauthorized")
            .to_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
