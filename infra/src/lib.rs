//! # Infrastructure Layer
//!
//! Concrete implementations of the ports defined in `um_core`:
//! - **Database**: MySQL repositories using SQLx, plus pool management and migrations
//! - **Identity**: HTTP client for the external identity service

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Identity service module - HTTP client over reqwest
pub mod identity;

pub use database::{DatabasePool, MySqlAuditEventRepository, MySqlUserRepository, PoolStatistics};
pub use identity::HttpIdentityServiceClient;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
