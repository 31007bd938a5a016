//! Form submission gateway.
//!
//! A bot-resistant admission service for contact and newsletter forms,
//! built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌───────────────────────────────────────────────┐
//!                    │                 FORM GATEWAY                   │
//!                    │                                                │
//!   POST /api/…      │  ┌─────────┐   ┌───────────┐   ┌───────────┐  │
//!   ─────────────────┼─▶│  http   │──▶│ rate      │──▶│ honeypot  │  │
//!                    │  │ server  │   │ limiter   │   │ + token   │  │
//!                    │  └─────────┘   └───────────┘   └─────┬─────┘  │
//!                    │                                      │        │
//!                    │                                      ▼        │
//!   200 / 400 / 429  │  ┌─────────┐   ┌───────────┐   ┌───────────┐  │
//!   ◀────────────────┼──│response │◀──│ recorder  │◀──│ validator │  │
//!                    │  └─────────┘   └───────────┘   └───────────┘  │
//!                    │                                                │
//!                    │  ┌──────────────────────────────────────────┐ │
//!                    │  │          Cross-Cutting Concerns           │ │
//!                    │  │  ┌────────┐ ┌─────────────┐ ┌──────────┐ │ │
//!                    │  │  │ config │ │observability│ │lifecycle │ │ │
//!                    │  │  └────────┘ └─────────────┘ └──────────┘ │ │
//!                    │  └──────────────────────────────────────────┘ │
//!                    └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use form_gateway::config::{load_config, GatewayConfig};
use form_gateway::observability::{logging, metrics};
use form_gateway::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "form-gateway", version, about = "Bot-resistant form submission gateway")]
struct Cli {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    logging::init_logging(config.observability.log_json);
    tracing::info!("form-gateway v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        contact_limit = config.rate_limit.contact.max_requests,
        contact_window_secs = config.rate_limit.contact.window_secs,
        distributed = config.redis.url.is_some(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Address validity was checked at config load.
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    let server = HttpServer::new(config).await;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
