//! Edge header gateway.
//!
//! Serves a static web application through a header policy that enables
//! cross-origin isolation (`SharedArrayBuffer`) and long-lived asset caching.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                EDGE GATEWAY                  │
//!                    │                                              │
//!  Client Request    │  ┌────────┐   ┌─────────┐   ┌────────────┐   │
//!  ──────────────────┼─▶│  http  │──▶│ gateway │──▶│   origin   │◀──┼── upstream server
//!                    │  │ server │   │         │   │ http / dir │   │   or dist/ directory
//!                    │  └────────┘   └────┬────┘   └────────────┘   │
//!                    │                    │ unbound                 │
//!                    │                    ▼                         │
//!  Client Response   │              ┌──────────┐                    │
//!  ◀─────────────────┼──────────────│ fallback │                    │
//!                    │              │  notice  │                    │
//!                    │              └──────────┘                    │
//!                    └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use url::Url;

use edge_gateway::config::{self, GatewayConfig, OriginConfig};
use edge_gateway::lifecycle::{startup, Shutdown};
use edge_gateway::observability::init_logging;
use edge_gateway::GatewayError;

#[derive(Parser)]
#[command(name = "edge-gateway")]
#[command(about = "Static asset gateway with isolation, security and cache headers", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address
    #[arg(short, long)]
    bind: Option<String>,

    /// Forward to an upstream static server (http://host:port)
    #[arg(long, conflicts_with_all = ["root", "unbound"])]
    upstream: Option<Url>,

    /// Serve assets from a local directory
    #[arg(long, conflicts_with = "unbound")]
    root: Option<PathBuf>,

    /// Run without an asset origin
    #[arg(long)]
    unbound: bool,

    /// Validate configuration, print it as JSON and exit
    #[arg(long)]
    check: bool,
}

impl Cli {
    fn apply_overrides(&self, config: &mut GatewayConfig) {
        if let Some(bind) = &self.bind {
            config.listener.bind_address = bind.clone();
        }
        if let Some(url) = &self.upstream {
            config.origin = Some(OriginConfig::Http { url: url.clone() });
        }
        if let Some(root) = &self.root {
            config.origin = Some(OriginConfig::Directory { root: root.clone() });
        }
        if self.unbound {
            config.origin = None;
        }
    }
}

fn resolve_config(cli: &Cli) -> Result<GatewayConfig, GatewayError> {
    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => GatewayConfig::default(),
    };
    cli.apply_overrides(&mut config);
    config::validate_config(&config).map_err(config::ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    if cli.check {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    init_logging(&config.observability);

    tracing::info!("edge-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        origin = ?config.origin,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    startup::start(config, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
