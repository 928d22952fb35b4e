mod api;
mod bootstrap;
mod health;

use std::time::Duration;

use anyhow::Result;
use bigbike_core::config::{AppConfig, LoadOptions};

fn init_logging(config: &AppConfig) {
    use bigbike_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

pub async fn run() -> Result<()> {
    // Load config and initialize logging before any other operations
    let config = AppConfig::load(LoadOptions::default())?;
    init_logging(&config);

    let app = bootstrap::bootstrap_with_config(config).await?;

    let router = health::router(app.kv.clone()).merge(api::router(app.state.clone()));

    let address = format!("{}:{}", app.config.server.bind_address, app.config.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(
        event_name = "system.server.started",
        correlation_id = "bootstrap",
        bind_address = %address,
        "bigbike-server listening"
    );

    let grace = Duration::from_secs(app.config.server.graceful_shutdown_secs);
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    // In-flight requests get the configured grace period after the signal;
    // past the deadline the process exits regardless.
    let mut deadline_rx = shutdown_rx.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(true);
        }
    });
    tokio::spawn(async move {
        if deadline_rx.changed().await.is_ok() {
            tokio::time::sleep(grace).await;
            tracing::warn!(
                event_name = "system.server.shutdown_deadline",
                correlation_id = "shutdown",
                grace_secs = grace.as_secs(),
                "graceful shutdown deadline exceeded, exiting"
            );
            std::process::exit(0);
        }
    });

    let mut serve_rx = shutdown_rx;
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            let _ = serve_rx.changed().await;
            tracing::info!(
                event_name = "system.server.stopping",
                correlation_id = "shutdown",
                "bigbike-server stopping"
            );
        })
        .await?;

    Ok(())
}
