//! Identity service module - HTTP client for the external identity service

mod http_client;

pub use http_client::HttpIdentityServiceClient;
