//! Bearer token middleware backed by identity service introspection.
//!
//! Extracts the token from the `Authorization` header, asks the identity
//! service whether it is active, and stores the introspection result in the
//! request extensions. The token is introspected exactly once per request.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, HttpMessage, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use um_core::services::identity::{IdentityService, TokenIntrospection};

use crate::handlers::error::{introspection_error_response, unauthorized_response};

/// Bearer token authentication middleware factory
pub struct BearerAuth {
    identity: Arc<dyn IdentityService>,
}

impl BearerAuth {
    pub fn new(identity: Arc<dyn IdentityService>) -> Self {
        Self { identity }
    }
}

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware {
            service: Rc::new(service),
            identity: Arc::clone(&self.identity),
        }))
    }
}

/// Bearer token authentication middleware service
pub struct BearerAuthMiddleware<S> {
    service: Rc<S>,
    identity: Arc<dyn IdentityService>,
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let identity = Arc::clone(&self.identity);

        Box::pin(async move {
            let token = match extract_bearer_token(&req) {
                Some(token) => token,
                None => {
                    tracing::debug!(path = req.path(), "Missing bearer token");
                    return Ok(reject(req, unauthorized_response()));
                }
            };

            let introspection = match identity.introspect_token(&token).await {
                Ok(introspection) => introspection,
                Err(e) => {
                    tracing::warn!(error = %e, "Token introspection failed");
                    return Ok(reject(req, introspection_error_response(&e)));
                }
            };

            if !introspection.active {
                tracing::debug!(path = req.path(), "Inactive bearer token");
                return Ok(reject(req, unauthorized_response()));
            }

            req.extensions_mut().insert::<TokenIntrospection>(introspection);

            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Short-circuit the request with an error response
fn reject<B>(req: ServiceRequest, response: HttpResponse) -> ServiceResponse<EitherBody<B>> {
    req.into_response(response).map_into_right_body()
}

/// Extracts Bearer token from Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};
    use um_core::services::identity::MockIdentityService;

    async fn echo_subject(req: actix_web::HttpRequest) -> HttpResponse {
        let active = req
            .extensions()
            .get::<TokenIntrospection>()
            .map(|i| i.active)
            .unwrap_or(false);
        HttpResponse::Ok().json(serde_json::json!({ "active": active }))
    }

    #[actix_rt::test]
    async fn test_active_token_passes_through() {
        let identity = MockIdentityService::new();
        let app = test::init_service(
            App::new().service(
                web::resource("/protected")
                    .route(web::get().to(echo_subject))
                    .wrap(BearerAuth::new(Arc::new(identity.clone()))),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header((AUTHORIZATION, "Bearer abc"))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["active"], true);
        assert_eq!(identity.introspected_tokens(), vec!["abc".to_string()]);
    }

    #[actix_rt::test]
    async fn test_wrong_scheme_rejected_without_introspection() {
        let identity = MockIdentityService::new();
        let app = test::init_service(
            App::new().service(
                web::resource("/protected")
                    .route(web::get().to(echo_subject))
                    .wrap(BearerAuth::new(Arc::new(identity.clone()))),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header((AUTHORIZATION, "Basic dXNlcjpwYXNz"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(identity.introspected_tokens().is_empty());
    }
}
