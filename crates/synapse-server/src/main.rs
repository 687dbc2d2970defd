//! Synapse: personal inbox, notes and trend radar server.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

mod routes;
mod state;

use state::AppState;

fn resolve_data_dir() -> PathBuf {
    std::env::var("SYNAPSE_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--help" | "-h" | "help" => {
                println!("Synapse: inbox, notes and trend radar server");
                println!();
                println!("Usage: synapse");
                println!();
                println!("Environment:");
                println!("  PORT                         HTTP port (default 8080)");
                println!("  SYNAPSE_DATA_DIR             Data directory (default ./data)");
                println!("  SYNAPSE_TRENDS_WINDOW_DAYS   Default trend window (default 14)");
                println!("  SYNAPSE_TRENDS_MAX_TOPICS    Default topic limit (default 7)");
                return Ok(());
            }
            other => {
                eprintln!("Unknown command: {}. Use 'synapse help' for usage.", other);
                std::process::exit(1);
            }
        }
    }

    let data_dir = resolve_data_dir();
    info!("Data directory: {}", data_dir.display());

    let config = synapse_core::SynapseConfig::from_env(&data_dir)?;
    let port = config.port;

    let store = synapse_store::SqliteStore::open(&config.data_paths.db)
        .map_err(|e| anyhow::anyhow!("Failed to open store: {}", e))?;

    let state = Arc::new(AppState::new(config, store));
    let app = routes::build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Synapse server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
