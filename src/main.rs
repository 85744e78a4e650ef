//! gatehouse: a thin site server.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client Request
//!   ──────────────▶ request id ─▶ trace ─▶ timeout ─▶ interceptors ─▶ handlers
//!                                                      │               │
//!                                                      ▼               ▼
//!                                               ┌────────────┐  ┌──────────────┐
//!                                               │ auth gate  │  │ query layer  │──▶ remote
//!                                               │ 302 or go  │  │ classify     │    libSQL
//!                                               └────────────┘  └──────────────┘
//!
//!   Cross-cutting: config (TOML + secrets), observability (tracing, metrics),
//!   lifecycle (signals, graceful shutdown), resilience (query deadline)
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use gatehouse::config::{load_config, EnvSecrets, SiteConfig};
use gatehouse::db::DatabaseConfig;
use gatehouse::observability::{logging, metrics};
use gatehouse::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "gatehouse")]
#[command(about = "Site server with auth redirect gate and database status page", long_about = None)]
struct Args {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long, env = "GATEHOUSE_CONFIG")]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => SiteConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);

    tracing::info!("gatehouse v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        query_timeout_ms = config.database.query_timeout_ms,
        "Configuration loaded"
    );

    let database = DatabaseConfig::from_secrets(&config.database, &EnvSecrets);

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config, database);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
