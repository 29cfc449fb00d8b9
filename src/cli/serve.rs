use crate::api::{AppState, build_app};
use crate::core::Converter;
use crate::core::config::AppConfig;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Runs the HTTP server until Ctrl-C.
pub async fn serve(config: &AppConfig) -> Result<()> {
    let converter = Converter::new(config.rate_table()?);
    let currencies = converter.currencies().join(", ");

    let static_dir = config.server.static_dir.as_ref().map(PathBuf::from);
    let static_dir = match static_dir {
        Some(dir) if !dir.is_dir() => {
            warn!(static_dir = %dir.display(), "Static directory not found, not serving files");
            None
        }
        other => other,
    };
    let app = build_app(AppState::new(converter), static_dir.as_deref());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    let local_addr = listener.local_addr().context("Failed to read local address")?;

    info!(listen = %local_addr, "Currency converter listening");
    info!(%currencies, "Available currencies");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server terminated with an error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
