/// API Error types
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mailgate_core::constants::{FORBIDDEN_MESSAGE, PROXY_ERROR_MESSAGE};
use serde_json::json;

/// API Error
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Forbidden: invalid proxy key")]
    Forbidden,

    #[error("Proxy error: {0}")]
    Proxy(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Forbidden => (
                StatusCode::FORBIDDEN,
                json!({
                    "error": FORBIDDEN_MESSAGE,
                }),
            ),
            ApiError::Proxy(details) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": PROXY_ERROR_MESSAGE,
                    "details": details,
                }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

/// Convert mailgate-core errors to API errors
impl From<mailgate_core::MailgateError> for ApiError {
    fn from(err: mailgate_core::MailgateError) -> Self {
        ApiError::Proxy(err.details())
    }
}
