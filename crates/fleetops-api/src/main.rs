use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use fleetops_api::config::ServerConfig;
use fleetops_api::routes;
use fleetops_api::AppState;
use fleetops_db::{Database, DatabaseConfig};

#[derive(Parser, Debug)]
#[command(name = "fleetops-api", about = "FleetOps reporting and export API")]
struct Args {
    /// Path to the server configuration file
    #[arg(short, long, default_value = "fleetops.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(true)
        .with_line_number(true)
        .init();

    let args = Args::parse();
    let config = ServerConfig::load_from_path(&args.config)?;

    info!("Starting FleetOps API");

    let db = Database::new(DatabaseConfig {
        path: config.database.path.clone(),
    })
    .await
    .context("Failed to open database")?;
    db.run_migrations().await.context("Failed to run migrations")?;

    let state = AppState::new(db);
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.listen_addr))?;
    info!("Listening on {}", config.server.listen_addr);

    axum::serve(listener, app).await.context("Server error")?;

    info!("FleetOps API stopped");
    Ok(())
}
