//! Common test utilities and helpers for integration tests
#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use mailgate_api::ApiContext;
use mailgate_core::ProxyConfig;
use secrecy::SecretString;
use std::sync::Arc;
use tower::ServiceExt;

pub const EMAIL_KEY: &str = "SG.test-email-key";
pub const VALIDATION_KEY: &str = "SG.test-validation-key";
pub const PROXY_SECRET: &str = "shared-s3cret";

/// Build a config pointing at the given upstream base URL
pub fn test_config(upstream_base_url: &str, proxy_secret: Option<&str>) -> ProxyConfig {
    ProxyConfig {
        email_api_key: SecretString::from(EMAIL_KEY.to_string()),
        validation_api_key: SecretString::from(VALIDATION_KEY.to_string()),
        proxy_secret: proxy_secret.map(|s| SecretString::from(s.to_string())),
        port: 0,
        upstream_base_url: upstream_base_url.trim_end_matches('/').to_string(),
        request_timeout: None,
    }
}

/// Build the proxy router for a config
pub fn test_app(config: ProxyConfig) -> Router {
    let ctx: Arc<ApiContext> = ApiContext::new(config).expect("failed to build context");
    mailgate_api::router(ctx)
}

/// Base URL of a port that was bound and released, so connections are refused
pub async fn unreachable_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Build a POST request with a JSON body and an optional proxy key
pub fn post_json(uri: &str, body: &str, proxy_key: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(key) = proxy_key {
        builder = builder.header("x-proxy-key", key);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Build a GET request with an optional proxy key
pub fn get(uri: &str, proxy_key: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(key) = proxy_key {
        builder = builder.header("x-proxy-key", key);
    }
    builder.body(Body::empty()).unwrap()
}

/// Send one request through the router
pub async fn call(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

/// Collect a response body as bytes
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

/// Collect a response body as JSON
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
