//! reqwest implementation of the `IdentityService` port
//!
//! - `PUT {base}/users/{user_id}` (id percent-encoded) with `{"status": <code>}` propagates status changes
//! - `POST {base}/oauth2/introspect` with form `token=<token>` checks bearer tokens

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::Serialize;
use std::time::Duration;

use um_core::domain::entities::user::UserStatus;
use um_core::errors::IdentityError;
use um_core::services::identity::{IdentityService, TokenIntrospection};
use um_shared::IdentityServiceConfig;

use crate::InfrastructureError;

#[derive(Debug, Serialize)]
struct StatusUpdate {
    status: i16,
}

/// HTTP client for the identity service
#[derive(Clone)]
pub struct HttpIdentityServiceClient {
    client: Client,
    base_url: Url,
    config: IdentityServiceConfig,
}

impl HttpIdentityServiceClient {
    /// Build a client with the configured request timeout
    ///
    /// Fails when the base URL does not parse or cannot carry a path.
    pub fn new(config: IdentityServiceConfig) -> Result<Self, InfrastructureError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            InfrastructureError::Config(format!("Invalid identity service URL: {}", e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(InfrastructureError::Config(format!(
                "Identity service URL cannot carry a path: {}",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// `{base}/users/{user_id}` with the id percent-encoded as one segment
    fn user_url(&self, user_id: &str) -> Url {
        let mut url = self.base_url.clone();
        // Always Ok: `new` rejects cannot-be-a-base URLs
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("users").push(user_id);
        }
        url
    }

    async fn ensure_success(response: Response) -> Result<Response, IdentityError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(IdentityError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        })
    }
}

fn transport_error(e: reqwest::Error) -> IdentityError {
    IdentityError::Unavailable {
        message: e.to_string(),
    }
}

#[async_trait]
impl IdentityService for HttpIdentityServiceClient {
    async fn update_user_status(&self, user_id: &str, status: UserStatus) -> Result<(), IdentityError> {
        let url = self.user_url(user_id);
        tracing::debug!(%url, status = status.code(), "Updating user status on identity service");

        let response = self
            .client
            .put(url.as_str())
            .json(&StatusUpdate {
                status: status.code(),
            })
            .send()
            .await
            .map_err(transport_error)?;

        Self::ensure_success(response).await.map_err(|e| {
            tracing::warn!(%url, error = %e, "Identity service rejected status update");
            e
        })?;

        Ok(())
    }

    async fn introspect_token(&self, token: &str) -> Result<TokenIntrospection, IdentityError> {
        let response = self
            .client
            .post(self.config.introspect_url())
            .form(&[("token", token)])
            .send()
            .await
            .map_err(transport_error)?;

        let response = Self::ensure_success(response).await?;

        response
            .json::<TokenIntrospection>()
            .await
            .map_err(|e| IdentityError::InvalidResponse {
                message: e.to_string(),
            })
    }
}
