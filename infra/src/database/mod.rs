//! Database module - MySQL implementations using SQLx
//!
//! - Connection pool management and schema migrations
//! - Repository implementations for users and audit events

pub mod connection;
pub mod mysql;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlAuditEventRepository, MySqlUserRepository};
