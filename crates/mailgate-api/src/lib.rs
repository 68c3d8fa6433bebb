/// Mailgate API - SendGrid proxy server
///
/// This module wires the proxy routes, the shared-secret gate and request
/// logging into an axum router.
pub mod api;
pub mod auth;
pub mod context;
pub mod error;
pub mod middleware;

pub use context::ApiContext;
pub use error::ApiError;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderName, Method, header},
    middleware as axum_middleware,
    routing::{get, post},
};
use mailgate_core::{
    MailgateError,
    constants::{MAX_REQUEST_BODY_BYTES, PROXY_KEY_HEADER},
};
use std::{future::Future, sync::Arc};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Build the proxy router
pub fn router(ctx: Arc<ApiContext>) -> Router {
    Router::new()
        .route("/", get(api::root::handler))
        .route("/health", get(api::health::handler))
        .route("/send", post(api::mail::send))
        .route("/bulk", post(api::mail::bulk))
        .route("/validate", post(api::mail::validate))
        // Gate every request, including unmatched paths
        .layer(axum_middleware::from_fn_with_state(
            Arc::clone(&ctx),
            auth::auth_middleware,
        ))
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(PROXY_KEY_HEADER)]),
        )
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .with_state(ctx)
}

/// Serve the proxy until Ctrl-C or SIGTERM
pub async fn serve(ctx: Arc<ApiContext>, listener: TcpListener) -> Result<(), MailgateError> {
    serve_with_shutdown(ctx, listener, shutdown_signal()).await
}

/// Serve the proxy until `shutdown` resolves, then drain in-flight requests
pub async fn serve_with_shutdown<F>(
    ctx: Arc<ApiContext>,
    listener: TcpListener,
    shutdown: F,
) -> Result<(), MailgateError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(ctx);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
