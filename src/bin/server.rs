//! Pokeview web API server.
//!
//! Usage:
//!   cargo run --bin pokeview-server -- --port 5000 --seed 7

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use pokeview::config::AppConfig;
use pokeview::provider::PokeApiClient;
use pokeview::service::{CreatureService, ServiceOptions};
use pokeview::web::{app, AppState};

#[derive(Parser)]
#[command(name = "pokeview-server")]
#[command(about = "JSON API for browsing creatures and simulating battles")]
struct Cli {
    /// Address to bind
    #[arg(long)]
    host: Option<String>,
    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,
    /// Seed for the battle random source
    #[arg(long)]
    seed: Option<u64>,
    /// Provider base URL
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    pokeview::logging::init("pokeview=info,tower_http=info");

    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    let provider = Arc::new(PokeApiClient::from_config(&config));
    let service = CreatureService::new(provider, ServiceOptions::from_config(&config));
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let state = Arc::new(AppState::new(service, config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "pokeview server listening");
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("pokeview server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
