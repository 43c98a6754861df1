//! Lonkind API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p lonkind-api
//! ```
//!
//! Configuration is loaded from environment variables (and `.env`).

use lonkind_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "Server failed to start");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration first; the log format depends on it
    let config = AppConfig::from_env()?;

    let tracing_config =
        TracingConfig::for_environment(config.app.env.is_production(), config.app.json_logs);
    if let Err(e) = try_init_tracing_with_config(tracing_config) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        store = ?config.store,
        port = config.api.port,
        "Starting Lonkind API server"
    );

    lonkind_api::run(config).await?;

    Ok(())
}
