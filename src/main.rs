use std::sync::Arc;

use tokio::signal;
use tracing_subscriber::EnvFilter;

use washbay::config::AppConfig;
use washbay::db::{self, FlushPolicy};
use washbay::router::build_router;
use washbay::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let store = db::init_store(&config.data_file, config.flush_policy)?;
    let state = Arc::new(AppState::new(store, config.clone()));

    if config.flush_policy == FlushPolicy::Batched {
        tracing::info!(interval_ms = config.flush_interval.as_millis() as u64, "batched flushing enabled");
        tokio::spawn(flush_periodically(Arc::clone(&state), config.flush_interval));
    }

    let app = build_router(Arc::clone(&state));

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // pending batched writes
    state.store().flush()?;
    tracing::info!("shutdown complete");

    Ok(())
}

async fn flush_periodically(state: Arc<AppState>, every: std::time::Duration) {
    let mut ticker = tokio::time::interval(every);
    loop {
        ticker.tick().await;
        if let Err(e) = state.store().flush() {
            tracing::error!(error = %e, "background flush failed");
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutdown signal received");
}
