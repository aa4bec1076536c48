//! Route table and request-level configuration
//!
//! Middleware that depends on the deployment (request tracing, security
//! headers) is added by the binary; everything a handler needs to run is
//! registered here so tests exercise the same routes.

use actix_web::{web, HttpResponse};
use std::sync::Arc;

use um_core::repositories::{AuditEventRepository, UserRepository};
use um_core::services::identity::IdentityService;
use um_shared::ServerConfig;

use crate::handlers::error::json_error_handler;
use crate::middleware::BearerAuth;
use crate::routes::health::health_check;
use crate::routes::verification::{verify_email::verify_email_id, AppState};

/// Register state, the JSON body limits and all routes
///
/// The verification routes are mounted under the configured context path
/// and require an active bearer token. `/health` stays at the root.
pub fn configure_app<U, A, I>(
    cfg: &mut web::ServiceConfig,
    app_state: web::Data<AppState<U, A, I>>,
    server: &ServerConfig,
) where
    U: UserRepository + 'static,
    A: AuditEventRepository + 'static,
    I: IdentityService + 'static,
{
    let identity: Arc<dyn IdentityService> = app_state.identity_service.clone();

    cfg.app_data(app_state)
        .app_data(
            web::JsonConfig::default()
                .limit(server.max_payload_size)
                .error_handler(json_error_handler),
        )
        .route("/health", web::get().to(health_check))
        .service(
            web::scope(&server.normalized_context_path()).service(
                web::resource("/verifyEmailId")
                    .route(web::post().to(verify_email_id::<U, A, I>))
                    .wrap(BearerAuth::new(identity)),
            ),
        )
        .default_service(web::route().to(not_found));
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "code": 404,
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
