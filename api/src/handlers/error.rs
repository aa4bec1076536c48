//! Mapping of domain and request errors onto HTTP responses

use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::StatusCode,
    HttpRequest, HttpResponse,
};
use std::collections::HashMap;
use validator::ValidationErrors;

use um_core::errors::{DomainError, IdentityError};

use crate::dto::ErrorResponse;

/// Message returned for any malformed body
pub const INVALID_REQUEST_MESSAGE: &str = "Invalid request data";

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Verification(verification_error) => {
            tracing::debug!(error = %verification_error, "Verification rejected");
            ErrorResponse::new(
                StatusCode::BAD_REQUEST,
                verification_error.error_code(),
                verification_error.to_string(),
            )
            .to_response()
        }
        DomainError::Identity(identity_error) => {
            tracing::error!(error = %identity_error, "Identity service call failed");
            ErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "identity_service_error",
                "Failed to update account status",
            )
            .to_response()
        }
        DomainError::Internal { message } => {
            tracing::error!(error = %message, "Internal error");
            ErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "An internal error occurred",
            )
            .to_response()
        }
    }
}

/// 400 for a body that deserialized but failed validation
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let mut details = HashMap::new();
    details.insert("validation_errors".to_string(), serde_json::json!(errors));

    ErrorResponse::new(
        StatusCode::BAD_REQUEST,
        "validation_error",
        INVALID_REQUEST_MESSAGE,
    )
    .with_details(details)
    .to_response()
}

/// 400 for a required header that is absent or blank
pub fn missing_header_response(name: &str) -> HttpResponse {
    let mut details = HashMap::new();
    details.insert("header".to_string(), serde_json::json!(name));

    ErrorResponse::new(
        StatusCode::BAD_REQUEST,
        "missing_header",
        format!("Missing required header: {}", name),
    )
    .with_details(details)
    .to_response()
}

pub fn unauthorized_response() -> HttpResponse {
    ErrorResponse::new(StatusCode::UNAUTHORIZED, "unauthorized", "Unauthorized").to_response()
}

/// Response for a failed token introspection
///
/// Transport failures mean the token could not be checked at all and are
/// reported as 503; anything else the identity service says is treated as a
/// rejected token.
pub fn introspection_error_response(error: &IdentityError) -> HttpResponse {
    match error {
        IdentityError::Unavailable { .. } => ErrorResponse::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "identity_service_unavailable",
            "Identity service unavailable",
        )
        .to_response(),
        IdentityError::UnexpectedStatus { .. } | IdentityError::InvalidResponse { .. } => {
            unauthorized_response()
        }
    }
}

/// Error handler for `web::JsonConfig` so malformed bodies get the JSON error shape
pub fn json_error_handler(error: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let mut details = HashMap::new();
    details.insert("body".to_string(), serde_json::json!(error.to_string()));

    let response = ErrorResponse::new(
        StatusCode::BAD_REQUEST,
        "validation_error",
        INVALID_REQUEST_MESSAGE,
    )
    .with_details(details)
    .to_response();

    InternalError::from_response(error, response).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use um_core::errors::VerificationError;

    #[test]
    fn test_verification_errors_are_bad_requests() {
        for error in [
            VerificationError::WrongCode,
            VerificationError::ExpiredCode,
            VerificationError::EmailNotFound,
        ] {
            let response = handle_domain_error(error.into());
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_identity_and_internal_errors_are_server_errors() {
        let identity = handle_domain_error(
            IdentityError::UnexpectedStatus {
                status: 502,
                body: String::new(),
            }
            .into(),
        );
        assert_eq!(identity.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let internal = handle_domain_error(DomainError::Internal {
            message: "db down".to_string(),
        });
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_introspection_errors() {
        let unavailable = introspection_error_response(&IdentityError::Unavailable {
            message: "timeout".to_string(),
        });
        assert_eq!(unavailable.status(), StatusCode::SERVICE_UNAVAILABLE);

        let rejected = introspection_error_response(&IdentityError::UnexpectedStatus {
            status: 400,
            body: String::new(),
        });
        assert_eq!(rejected.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_missing_header() {
        let response = missing_header_response("appId");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
