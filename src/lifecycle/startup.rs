//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the asset origin and gateway from validated configuration
//! - Bind the listener and run the server until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The origin is resolved once; an unbound origin is logged, not rejected

use tokio::net::TcpListener;

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::gateway::{Fallback, Gateway};
use crate::http::GatewayServer;
use crate::lifecycle::Shutdown;
use crate::origin;

/// Build the gateway described by the configuration.
pub fn build_gateway(config: &GatewayConfig) -> Gateway {
    let origin = origin::from_config(config.origin.as_ref());
    if origin.is_none() {
        tracing::warn!("No asset origin configured; every request gets the local development notice");
    }
    Gateway::new(origin, Fallback::new(&config.fallback))
}

/// Bind the configured address and serve until `shutdown` fires.
pub async fn start(config: GatewayConfig, shutdown: &Shutdown) -> Result<(), GatewayError> {
    let gateway = build_gateway(&config);

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| GatewayError::Bind {
            address: config.listener.bind_address.clone(),
            source,
        })?;

    let server = GatewayServer::new(&config, gateway);
    server.run(listener, shutdown.subscribe()).await?;
    Ok(())
}
