//! Ozmeteo server binary.

use clap::Parser;
use log::info;

use ozmeteo::cli::{Cli, ServerConfig};
use ozmeteo::server::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let config = ServerConfig::from_cli(&cli)?;

    info!("upstream forecast API: {}", config.upstream);
    let state = AppState::new(config.upstream.clone())?;
    let app = create_router(state);

    let listener =
        tokio::net::TcpListener::bind((config.bind.as_str(), config.port)).await?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
