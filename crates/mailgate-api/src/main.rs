use anyhow::Context;
use mailgate_api::ApiContext;
use mailgate_core::{ProxyConfig, utils::logging::fingerprint};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber for structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    info!("Starting Mailgate SendGrid proxy");

    // Credentials are required before anything binds
    let config = ProxyConfig::from_env()
        .inspect_err(|e| error!(error = %e, "Missing or invalid configuration, exiting"))?;

    let ctx = ApiContext::new(config)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], ctx.config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(
        port = ctx.config.port,
        upstream = %ctx.config.upstream_base_url,
        auth_enabled = ctx.config.auth_enabled(),
        email_api_key = %fingerprint(&ctx.config.email_api_key),
        validation_api_key = %fingerprint(&ctx.config.validation_api_key),
        "Server running on port {}",
        ctx.config.port
    );

    mailgate_api::serve(ctx, listener).await?;

    Ok(())
}
