//! # User Management Core
//!
//! Domain layer for the user management backend: user and audit entities,
//! the email verification workflow, repository interfaces, the identity
//! service seam, and the error types shared by the outer layers.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
