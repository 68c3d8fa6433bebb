/// Mailgate Core - Shared library for the Mailgate SendGrid proxy
///
/// This crate contains the configuration, error type and upstream client
/// used by the Mailgate API server.
pub mod config;
pub mod constants;
pub mod error;
pub mod upstream;
pub mod utils;

// Re-export commonly used types
pub use config::ProxyConfig;
pub use error::MailgateError;
pub use upstream::{Endpoint, UpstreamClient, UpstreamResponse};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
