/// Shared-secret authorization gate
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use mailgate_core::constants::PROXY_KEY_HEADER;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use subtle::ConstantTimeEq;
use tracing::warn;

use crate::{context::ApiContext, error::ApiError};

/// Rejects requests whose `x-proxy-key` does not match the configured secret
///
/// No-op when no secret is configured.
pub async fn auth_middleware(
    State(ctx): State<Arc<ApiContext>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Err(e) = check_proxy_key(request.headers(), ctx.config.proxy_secret.as_ref()) {
        warn!(
            method = %request.method(),
            path = %request.uri().path(),
            has_key = request.headers().contains_key(PROXY_KEY_HEADER),
            "Rejected request with invalid proxy key"
        );
        return Err(e);
    }

    Ok(next.run(request).await)
}

/// Checks the proxy key header against the configured secret
pub fn check_proxy_key(
    headers: &HeaderMap,
    secret: Option<&SecretString>,
) -> Result<(), ApiError> {
    let Some(secret) = secret else {
        return Ok(());
    };

    let provided = headers
        .get(PROXY_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match provided {
        Some(key) if keys_match(key, secret) => Ok(()),
        _ => Err(ApiError::Forbidden),
    }
}

/// Compares in constant time for equal-length inputs
fn keys_match(provided: &str, secret: &SecretString) -> bool {
    provided
        .as_bytes()
        .ct_eq(secret.expose_secret().as_bytes())
        .into()
}
