//! Demo application: a small axum server with the tracking layer applied.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use tracking_inject::config::{load_config, AppConfig};
use tracking_inject::http::HttpServer;
use tracking_inject::observability::init_tracing;

#[derive(Parser, Debug)]
#[command(name = "tracking-inject", about = "HTML tracking snippet injection demo server")]
struct Args {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    init_tracing(&config.observability);

    tracing::info!("tracking-inject v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        tracking_enabled = config.tracking.enabled,
        insertion = %config.tracking.insertion,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let server = HttpServer::new(&config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
