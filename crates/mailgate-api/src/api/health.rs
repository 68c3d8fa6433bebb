/// Health check endpoint
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::context::ApiContext;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
    pub auth_enabled: bool,
}

/// Health check handler
///
/// Reports process state only; SendGrid is never contacted.
pub async fn handler(State(ctx): State<Arc<ApiContext>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: mailgate_core::VERSION.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        auth_enabled: ctx.config.auth_enabled(),
    })
}
