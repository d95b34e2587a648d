//! Asset origin subsystem.
//!
//! # Data Flow
//! ```text
//! Gateway::handle(request)
//!     → Option<Arc<dyn AssetOrigin>>
//!         None        → fallback notice (origin never called)
//!         Some(origin) → origin.fetch(request)
//!                         → http.rs      (upstream static server over HTTP)
//!                         → directory.rs (local directory via ServeDir)
//! ```
//!
//! # Design Decisions
//! - The origin is an injected capability, not a global lookup
//! - Requests are forwarded unmodified apart from the URI authority
//! - Origin errors are returned as-is; translating them is the server's job

pub mod directory;
pub mod http;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use futures_util::future::BoxFuture;

use crate::config::OriginConfig;

pub use directory::DirectoryOrigin;
pub use http::HttpOrigin;

/// Errors raised while an origin resolves a request.
#[derive(Debug, thiserror::Error)]
pub enum OriginError {
    /// The upstream connection or exchange failed.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] hyper_util::client::legacy::Error),

    /// The forwarded request could not be rebuilt for the upstream.
    #[error("invalid upstream request: {0}")]
    InvalidRequest(#[from] axum::http::Error),
}

/// A collaborator that serves static files for a request.
pub trait AssetOrigin: Send + Sync + std::fmt::Debug {
    /// Resolve a request to a response. Body and method semantics are the origin's.
    fn fetch(&self, request: Request<Body>) -> BoxFuture<'_, Result<Response<Body>, OriginError>>;
}

/// Build the configured origin; `None` means the origin is unbound.
pub fn from_config(config: Option<&OriginConfig>) -> Option<Arc<dyn AssetOrigin>> {
    let origin: Arc<dyn AssetOrigin> = match config? {
        OriginConfig::Http { url } => Arc::new(HttpOrigin::new(url)),
        OriginConfig::Directory { root } => Arc::new(DirectoryOrigin::new(root)),
    };
    tracing::info!(origin = ?origin, "Asset origin bound");
    Some(origin)
}
