//! Form submission gateway library.
//!
//! Accepts untrusted contact and newsletter submissions for a multilingual
//! marketing site and admits them through a bot-mitigation pipeline: rate
//! limiting per client identity, a honeypot field, a time-based form token,
//! and strict payload validation.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;
pub mod submission;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
