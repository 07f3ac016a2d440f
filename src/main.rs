use std::net::SocketAddr;

use anyhow::Context;
use dotenvy::dotenv;
use sentinel::logging::init_tracing;
use sentinel::router::init_router;
use sentinel::state::init_app_state;
use sentinel_config::{LoggingConfig, ServerConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _log_guard = init_tracing(&LoggingConfig::from_env())?;

    let server_config = ServerConfig::from_env();
    let state = init_app_state(&server_config).await?;
    let app = init_router(state);

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

    info!("🚀 Server running on http://{address}");
    info!("📚 OpenAPI document at http://{address}/api-docs/openapi.json");

    // Peer addresses feed the login rate limiter.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
