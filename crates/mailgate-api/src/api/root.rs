/// Liveness endpoint
use mailgate_core::constants::LIVENESS_MESSAGE;

/// Liveness handler
pub async fn handler() -> &'static str {
    LIVENESS_MESSAGE
}
