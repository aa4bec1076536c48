//! External identity/authorization service configuration

use serde::{Deserialize, Serialize};

/// Connection settings for the identity service that owns user credentials
/// and bearer tokens
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IdentityServiceConfig {
    /// Base URL, e.g. `http://identity:8000/oauth-scim-service`
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Path (relative to `base_url`) of the token introspection endpoint
    pub introspect_path: String,
}

impl Default for IdentityServiceConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("http://localhost:8000/oauth-scim-service"),
            timeout_secs: 10,
            introspect_path: String::from("/oauth2/introspect"),
        }
    }
}

impl IdentityServiceConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("IDENTITY_SERVICE_URL").unwrap_or(defaults.base_url),
            timeout_secs: std::env::var("IDENTITY_SERVICE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            introspect_path: std::env::var("IDENTITY_SERVICE_INTROSPECT_PATH")
                .unwrap_or(defaults.introspect_path),
        }
    }

    /// Create a configuration pointing at the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// URL of the token introspection endpoint
    pub fn introspect_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.introspect_path.trim_start_matches('/')
        )
    }
}
