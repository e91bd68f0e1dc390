//! Notes worker
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ http::server ──▶ pipeline::dispatcher
//!                                   │
//!                                   ├─ global middleware (session, load_user)
//!                                   ├─ init gate (seed users once)
//!                                   ├─ routing::router (path → route)
//!                                   ├─ route interrupters (require_auth)
//!                                   ├─ terminal handler (page content)
//!                                   └─ render::Document
//!   Client ◀────────────────────────────┘
//!
//!   store::MemoryStore ◀── middleware, handlers, seeder
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use notes_worker::app::build_pipeline;
use notes_worker::config::{load_config, AppConfig};
use notes_worker::observability::{logging, metrics};
use notes_worker::store::{DataStore, MemoryStore};
use notes_worker::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "notes-worker")]
#[command(about = "Notes and users demo site", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    logging::init(&config.observability.log_level);
    tracing::info!("notes-worker v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config_file = ?cli.config,
        bind_address = %config.listener.bind_address,
        seed_enabled = config.seed.enabled,
        seed_policy = ?config.seed.policy,
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

    let store: Arc<dyn DataStore> = Arc::new(MemoryStore::with_initial_schema());
    let pipeline = Arc::new(build_pipeline(&config, store));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, pipeline);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
