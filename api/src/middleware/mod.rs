pub mod auth;
pub mod security;

pub use auth::BearerAuth;
pub use security::SecurityMiddleware;
