mod config;
mod db;
mod lessons;
mod server;
mod types;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::config::AppConfig;
use crate::db::LessonDbManager;
use crate::types::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.json".to_string());
    let config = if Path::new(&config_path).exists() {
        AppConfig::load_from_file(Path::new(&config_path))
            .map_err(|e| anyhow::anyhow!("Failed to load config from {config_path}: {e}"))?
    } else {
        info!("No config file at {}, using defaults", config_path);
        AppConfig::default()
    };

    let lesson_db = LessonDbManager::new(&config.db_path);
    let addr: SocketAddr = format!("{}:{}", config.address, config.port).parse()?;
    let state = Arc::new(AppState { lesson_db });

    let router = server::create_router(state);

    info!("Starting tutorbase server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
