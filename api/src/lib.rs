//! HTTP layer of the user management service
//!
//! Exposes the email verification endpoint used to activate accounts, plus a
//! liveness probe. Handlers are generic over the repository and identity
//! service implementations so tests can run them against in-memory doubles.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;
