/// API Context - shared state for all API handlers
use mailgate_core::{MailgateError, ProxyConfig, UpstreamClient};
use std::sync::Arc;

/// API Context contains the immutable resources shared by handlers
#[derive(Clone)]
pub struct ApiContext {
    /// Configuration read at startup
    pub config: ProxyConfig,

    /// SendGrid client
    pub upstream: UpstreamClient,
}

impl ApiContext {
    /// Create a new API context
    pub fn new(config: ProxyConfig) -> Result<Arc<Self>, MailgateError> {
        let upstream = UpstreamClient::new(&config)?;

        Ok(Arc::new(Self { config, upstream }))
    }
}
