/// SendGrid forwarding endpoints
use axum::{
    body::Body,
    extract::State,
    http::{StatusCode, header},
    response::Response,
};
use bytes::Bytes;
use mailgate_core::{Endpoint, UpstreamResponse};
use std::sync::Arc;
use tracing::Instrument;

use crate::{context::ApiContext, error::ApiError};

/// `POST /send`
pub async fn send(State(ctx): State<Arc<ApiContext>>, body: Bytes) -> Result<Response, ApiError> {
    forward(&ctx, Endpoint::MailSend, body).await
}

/// `POST /bulk` - same upstream endpoint and credential as `/send`
pub async fn bulk(State(ctx): State<Arc<ApiContext>>, body: Bytes) -> Result<Response, ApiError> {
    forward(&ctx, Endpoint::MailSend, body).await
}

/// `POST /validate`
pub async fn validate(
    State(ctx): State<Arc<ApiContext>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    forward(&ctx, Endpoint::EmailValidation, body).await
}

async fn forward(ctx: &ApiContext, endpoint: Endpoint, body: Bytes) -> Result<Response, ApiError> {
    let span = tracing::info_span!("forward", endpoint = endpoint.name());
    let upstream = ctx.upstream.forward(endpoint, body).instrument(span).await?;
    passthrough(upstream)
}

/// Copies upstream status, content type and body into a reply
fn passthrough(upstream: UpstreamResponse) -> Result<Response, ApiError> {
    let status = StatusCode::from_u16(upstream.status)
        .map_err(|e| ApiError::Proxy(format!("Invalid upstream status: {}", e)))?;

    let mut builder = Response::builder().status(status);
    if let Some(content_type) = &upstream.content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }

    builder
        .body(Body::from(upstream.body))
        .map_err(|e| ApiError::Proxy(e.to_string()))
}
