//! Polls site (v1)
//!
//! Serves the polls route table over HTTP with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────────┐
//!                       │                    POLLS SITE                     │
//!                       │                                                   │
//!   Client Request      │  ┌─────────┐    ┌──────────┐    ┌─────────────┐  │
//!   ────────────────────┼─▶│  http   │───▶│ routing  │───▶│ polls views │  │
//!                       │  │ server  │    │ UrlConf  │    │  (handlers) │  │
//!                       │  └─────────┘    └──────────┘    └──────┬──────┘  │
//!   Client Response     │       ▲                                 │         │
//!   ◀───────────────────┼───────┴─────────────────────────────────┘         │
//!                       │                                                   │
//!                       │  ┌─────────────────────────────────────────────┐  │
//!                       │  │           Cross-Cutting Concerns            │  │
//!                       │  │  config · observability · lifecycle         │  │
//!                       │  └─────────────────────────────────────────────┘  │
//!                       └──────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use polls_site::config::{load_config, SiteConfig};
use polls_site::lifecycle::signals::shutdown_on_signal;
use polls_site::observability::{logging, metrics};
use polls_site::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "polls-site")]
#[command(about = "Serve the polls app", long_about = None)]
struct Args {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => SiteConfig::default(),
    };

    logging::init(&config.observability);

    tracing::info!("polls-site v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        mount_prefix = %config.urls.mount_prefix,
        request_timeout_secs = config.timeouts.request_secs,
        config_file = ?args.config,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // Build the route table before binding so a bad table never takes traffic.
    let server = HttpServer::new(config.clone())?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    tokio::spawn(shutdown_on_signal(shutdown.clone()));

    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
