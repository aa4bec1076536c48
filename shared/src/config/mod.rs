//! Configuration module with service-specific sub-modules
//!
//! - `audit` - Audit event emission
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `identity` - External identity service endpoints
//! - `server` - HTTP server and routing configuration

pub mod audit;
pub mod database;
pub mod environment;
pub mod identity;
pub mod server;

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub use audit::AuditConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use identity::IdentityServiceConfig;
pub use server::ServerConfig;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Identity service configuration
    pub identity: IdentityServiceConfig,

    /// Audit configuration
    pub audit: AuditConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            identity: IdentityServiceConfig::default(),
            audit: AuditConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from process environment variables
    ///
    /// A `.env` file in the working directory is loaded first when present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = Environment::from_env();
        let mut server = ServerConfig::from_env();
        if env.is_production() && std::env::var("SERVER_SECURITY_HEADERS").is_err() {
            server.security_headers = true;
        }

        Self {
            environment: env,
            server,
            database: DatabaseConfig::from_env(),
            identity: IdentityServiceConfig::from_env(),
            audit: AuditConfig::from_env(),
            logging: LoggingConfig::from_env(env),
        }
    }

    /// Load configuration from a file layered with `APP__`-prefixed
    /// environment variables (`APP__SERVER__PORT=9000`)
    ///
    /// A missing file is not an error; every section falls back to its defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        let app_config: AppConfig = settings.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.identity.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "identity.base_url must not be empty".to_string(),
            ));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.server.context_path, "/user-mgmt");
        assert!(config.audit.async_writes);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_overrides_sections() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
environment = "production"

[server]
port = 9100
context_path = "/accounts"

[identity]
base_url = "http://identity.internal/oauth-scim-service"
timeout_secs = 3

[audit]
async_writes = false
"#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.context_path, "/accounts");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(
            config.identity.base_url,
            "http://identity.internal/oauth-scim-service"
        );
        assert_eq!(config.identity.timeout_secs, 3);
        assert!(!config.audit.async_writes);
        assert_eq!(config.audit.source, "USER MANAGEMENT SERVICE");
    }

    #[test]
    fn test_from_file_rejects_invalid_values() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[database]\nmax_connections = 0").unwrap();

        let result = AppConfig::from_file(file.path());
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
