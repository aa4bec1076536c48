//! Server configuration module

use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Worker threads (0 = number of CPU cores)
    pub workers: usize,

    /// Path prefix every user management route is mounted under
    pub context_path: String,

    /// Maximum JSON payload size in bytes
    pub max_payload_size: usize,

    /// Add HSTS/CSP style security headers to every response
    pub security_headers: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from("0.0.0.0"),
            port: 8080,
            workers: 0,
            context_path: String::from("/user-mgmt"),
            max_payload_size: 64 * 1024,
            security_headers: false,
        }
    }
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("SERVER_HOST").unwrap_or(defaults.host),
            port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            workers: std::env::var("SERVER_WORKERS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.workers),
            context_path: std::env::var("SERVER_CONTEXT_PATH").unwrap_or(defaults.context_path),
            max_payload_size: std::env::var("SERVER_MAX_PAYLOAD_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_payload_size),
            security_headers: std::env::var("SERVER_SECURITY_HEADERS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.security_headers),
        }
    }

    /// Get the bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Context path normalized to a leading slash and no trailing slash
    ///
    /// An empty or `/` context path yields an empty prefix.
    pub fn normalized_context_path(&self) -> String {
        let trimmed = self.context_path.trim().trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{}", trimmed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let config = ServerConfig::new("127.0.0.1", 9000);
        assert_eq!(config.bind_address(), "127.0.0.1:9000");
    }

    #[test]
    fn test_context_path_normalization() {
        let mut config = ServerConfig::default();
        assert_eq!(config.normalized_context_path(), "/user-mgmt");

        config.context_path = "accounts/".to_string();
        assert_eq!(config.normalized_context_path(), "/accounts");

        config.context_path = "/".to_string();
        assert_eq!(config.normalized_context_path(), "");
    }
}
