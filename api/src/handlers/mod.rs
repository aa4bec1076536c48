//! Shared handler helpers: error mapping and request metadata

pub mod error;
pub mod request_context;
