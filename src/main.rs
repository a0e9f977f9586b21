//! request-echo server.
//!
//! Describes every request it receives: `GET {prefix}/hello` returns the
//! method, path, headers, query parameters, client address and URL;
//! `POST {prefix}/hello` adds the body, parsed as JSON when possible.
//!
//! ```text
//!     Client ──▶ listener ──▶ request id ──▶ trace/timeout ──▶ router
//!                                                               │
//!                                   ┌───────────────────────────┤
//!                                   ▼                           ▼
//!                             /hello (GET/POST)        /docs, /openapi.json
//!                                   │
//!                                   ▼
//!                             RequestDescriber ──▶ JSON response
//! ```

use std::path::PathBuf;

use clap::Parser;

use request_echo::config::{load_config, EchoConfig};
use request_echo::lifecycle::startup;

#[derive(Parser)]
#[command(name = "request-echo")]
#[command(about = "HTTP endpoint that describes the requests it receives", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => EchoConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    startup::run(config).await
}
