//! Shared configuration and utilities for the user management server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment or a config file
//! - Email helpers (lookup normalization, masking for logs)

pub mod config;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuditConfig, ConfigError, DatabaseConfig, Environment, IdentityServiceConfig,
    LogFormat, LoggingConfig, ServerConfig,
};
pub use utils::email;
