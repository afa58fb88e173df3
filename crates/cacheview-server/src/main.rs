use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use cacheview_core::ServerConfig;
use cacheview_server::{router, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

const SWEEP_EVERY: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .compact()
        .init();

    let config = ServerConfig::from_env()?;
    let state = Arc::new(AppState::new(config.cache.clone()));
    spawn_sweeper(Arc::clone(&state));
    let app = router(state, &config.static_dir);

    let addr = config.addr();
    info!("Server listening on {}", addr);
    info!("Serving static files from {}", config.static_dir);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Reclaim expired entries even when no new keys are being written
fn spawn_sweeper(state: Arc<AppState>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SWEEP_EVERY);
        loop {
            interval.tick().await;
            state.cache.purge_expired();
        }
    });
}
