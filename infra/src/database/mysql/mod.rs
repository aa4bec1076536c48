//! MySQL repository implementations.

mod audit_repository_impl;
mod user_repository_impl;

pub use audit_repository_impl::MySqlAuditEventRepository;
pub use user_repository_impl::MySqlUserRepository;

use um_core::errors::DomainError;

/// Map a column read failure into a domain error naming the column
pub(crate) fn column_error(column: &str, e: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("Failed to get {}: {}", column, e),
    }
}
