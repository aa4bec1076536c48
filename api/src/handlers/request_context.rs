//! Request metadata carried into the verification workflow

use actix_web::{HttpMessage, HttpRequest, HttpResponse};
use tracing_actix_web::RequestId;
use uuid::Uuid;

use um_core::domain::entities::verification::AuditContext;

use super::error::missing_header_response;

pub const APP_ID_HEADER: &str = "appId";
pub const ORG_ID_HEADER: &str = "orgId";
pub const USER_ID_HEADER: &str = "userId";
pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";

/// Application headers sent with every user management call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHeaders {
    pub app_id: String,
    pub org_id: Option<String>,
    pub user_id: Option<String>,
}

impl RequestHeaders {
    /// Read the application headers, rejecting requests without `appId`
    pub fn from_request(req: &HttpRequest) -> Result<Self, HttpResponse> {
        let app_id = header_value(req, APP_ID_HEADER)
            .ok_or_else(|| missing_header_response(APP_ID_HEADER))?;

        Ok(Self {
            app_id,
            org_id: header_value(req, ORG_ID_HEADER),
            user_id: header_value(req, USER_ID_HEADER),
        })
    }

    /// Combine with request metadata for audit events
    pub fn into_audit_context(self, req: &HttpRequest) -> AuditContext {
        AuditContext::new(self.app_id)
            .with_org_id(self.org_id)
            .with_caller_user_id(self.user_id)
            .with_request(Some(correlation_id(req)), client_ip(req))
    }
}

/// Trimmed header value; blank or non-ASCII values count as absent
fn header_value(req: &HttpRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)?
        .to_str()
        .ok()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Correlation id for the request
///
/// An id supplied by the caller wins, then the id assigned by the tracing
/// middleware. A fresh one is generated when neither is present.
pub fn correlation_id(req: &HttpRequest) -> String {
    if let Some(id) = header_value(req, CORRELATION_ID_HEADER) {
        return id;
    }

    req.extensions()
        .get::<RequestId>()
        .map(|id| id.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Client address, honouring `Forwarded`/`X-Forwarded-For`
pub fn client_ip(req: &HttpRequest) -> Option<String> {
    req.connection_info()
        .realip_remote_addr()
        .map(|addr| strip_port(addr).to_string())
}

fn strip_port(addr: &str) -> &str {
    if let Some(rest) = addr.strip_prefix('[') {
        // [v6]:port
        return rest.split(']').next().unwrap_or(rest);
    }
    match addr.rsplit_once(':') {
        Some((host, port)) if !host.contains(':') && port.parse::<u16>().is_ok() => host,
        _ => addr,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test::TestRequest};

    #[test]
    fn test_headers_parsed() {
        let req = TestRequest::default()
            .insert_header((APP_ID_HEADER, "app-1"))
            .insert_header((ORG_ID_HEADER, "org-1"))
            .to_http_request();

        let headers = RequestHeaders::from_request(&req).unwrap();
        assert_eq!(headers.app_id, "app-1");
        assert_eq!(headers.org_id.as_deref(), Some("org-1"));
        assert!(headers.user_id.is_none());
    }

    #[test]
    fn test_blank_app_id_rejected() {
        let req = TestRequest::default()
            .insert_header((APP_ID_HEADER, "  "))
            .to_http_request();

        let response = RequestHeaders::from_request(&req).unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_caller_correlation_id_wins() {
        let req = TestRequest::default()
            .insert_header((CORRELATION_ID_HEADER, "req-42"))
            .to_http_request();
        assert_eq!(correlation_id(&req), "req-42");

        let generated = correlation_id(&TestRequest::default().to_http_request());
        assert!(Uuid::parse_str(&generated).is_ok());
    }

    #[test]
    fn test_audit_context_from_headers() {
        let req = TestRequest::default()
            .insert_header((APP_ID_HEADER, "app-1"))
            .insert_header((USER_ID_HEADER, "caller-9"))
            .insert_header(("x-forwarded-for", "203.0.113.7"))
            .to_http_request();

        let context = RequestHeaders::from_request(&req)
            .unwrap()
            .into_audit_context(&req);
        assert_eq!(context.app_id, "app-1");
        assert_eq!(context.caller_user_id.as_deref(), Some("caller-9"));
        assert_eq!(context.client_ip.as_deref(), Some("203.0.113.7"));
        assert!(context.correlation_id.is_some());
    }

    #[test]
    fn test_strip_port() {
        assert_eq!(strip_port("10.0.0.1:5555"), "10.0.0.1");
        assert_eq!(strip_port("10.0.0.1"), "10.0.0.1");
        assert_eq!(strip_port("[::1]:8080"), "::1");
        assert_eq!(strip_port("::1"), "::1");
    }
}
