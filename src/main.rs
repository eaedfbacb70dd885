//! Topic relay.
//!
//! A small web backend in front of a robot's rosbridge server. Every request
//! to `/` or `/api/topics` opens a websocket to the bridge, calls
//! `/rosapi/topics`, closes the socket and renders the result.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request        ┌──────────────────────────────────────────┐
//!     ──────────────────────┼─▶ http::server ──▶ http::handlers        │
//!                           │                        │                 │
//!                           │                        ▼                 │
//!                           │               rosbridge::client ─────────┼──▶ ws://robot:9090
//!                           │                        │                 │    (/rosapi/topics)
//!     Client Response       │                        ▼                 │
//!     ◀─────────────────────┼── HTML page / JSON ◀── TopicListing      │
//!                           │                                          │
//!                           │  config · observability · lifecycle      │
//!                           └──────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use topic_relay::config::load_or_default;
use topic_relay::lifecycle::startup;
use topic_relay::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "topic-relay")]
#[command(about = "Serve a robot's rosbridge topic list over HTTP", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_or_default(cli.config.as_deref())?;
    init_logging(&config.observability);

    tracing::info!("topic-relay v{} starting", env!("CARGO_PKG_VERSION"));

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
