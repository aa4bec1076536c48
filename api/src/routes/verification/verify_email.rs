use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use um_core::repositories::{AuditEventRepository, UserRepository};
use um_core::services::identity::IdentityService;

use crate::dto::verification::{VerifyEmailRequest, VerifyEmailResponse};
use crate::handlers::error::{handle_domain_error, validation_error_response};
use crate::handlers::request_context::RequestHeaders;

use super::AppState;

/// Handler for POST {context_path}/verifyEmailId
///
/// Checks the code emailed to a newly registered user and activates the
/// account. Runs behind [`BearerAuth`](crate::middleware::BearerAuth), so the
/// caller's token has already been introspected.
///
/// # Headers
///
/// - `appId` (required): application the user registered with
/// - `orgId`, `userId` (optional): recorded on audit events
///
/// # Request Body
///
/// ```json
/// {
///     "code": "123456",
///     "emailId": "jane@example.com"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "verified": true }
/// ```
///
/// ## Errors
/// - 400 Bad Request: invalid or expired code, unknown email, invalid body or missing `appId`
/// - 401 Unauthorized: missing or inactive bearer token
/// - 500 Internal Server Error: storage failure or identity service rejected the update
/// - 503 Service Unavailable: identity service unreachable during token introspection
pub async fn verify_email_id<U, A, I>(
    req: HttpRequest,
    state: web::Data<AppState<U, A, I>>,
    request: web::Json<VerifyEmailRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    A: AuditEventRepository + 'static,
    I: IdentityService + 'static,
{
    let headers = match RequestHeaders::from_request(&req) {
        Ok(headers) => headers,
        Err(response) => return response,
    };

    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    let context = headers.into_audit_context(&req);

    match state
        .verification_service
        .verify_email(&request.email_id, &request.code, &context)
        .await
    {
        Ok(result) => HttpResponse::Ok().json(VerifyEmailResponse {
            verified: result.verified,
        }),
        Err(error) => handle_domain_error(error),
    }
}
