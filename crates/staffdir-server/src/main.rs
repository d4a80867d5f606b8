//! Binary entrypoint for the staff directory HTTP server.
//!
//! Configuration comes from environment variables; see [`ServerConfig`].

use std::process;

use staffdir_server::config::ServerConfig;
use staffdir_server::router::build_router;
use staffdir_server::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    if let Err(e) = run().await {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;
    let state = AppState::new(&config.db_path)
        .map_err(|e| format!("failed to open database '{}': {}", config.db_path, e))?;

    let app = build_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("staffdir server listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
