//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the gateway mounted on every path and method
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener with graceful shutdown
//! - Turn origin failures into `502 Bad Gateway`

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::gateway::Gateway;
use crate::http::request::{RequestIdExt, UuidRequestId, X_REQUEST_ID};
use crate::lifecycle::signals::wait_for_shutdown;

/// Body returned when the asset origin fails.
pub const BAD_GATEWAY_BODY: &str = "Upstream request failed";

/// HTTP server hosting the edge gateway.
pub struct GatewayServer {
    router: Router,
}

impl GatewayServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: &GatewayConfig, gateway: Gateway) -> Self {
        let router = Self::build_router(config, gateway);
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, gateway: Gateway) -> Router {
        Router::new()
            .route("/{*path}", any(gateway_handler))
            .route("/", any(gateway_handler))
            .with_state(gateway)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = request.request_id().unwrap_or("unknown"),
                )
            }))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
    }

    /// The fully layered router, for driving the server in-process.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Hand the request to the gateway; this is where origin errors stop.
async fn gateway_handler(State(gateway): State<Gateway>, request: Request<Body>) -> Response {
    let request_id = request.request_id().unwrap_or("unknown").to_string();
    let path = request.uri().path().to_string();

    match gateway.handle(request).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                path = %path,
                error = %e,
                "Asset origin failed"
            );
            (StatusCode::BAD_GATEWAY, BAD_GATEWAY_BODY).into_response()
        }
    }
}
