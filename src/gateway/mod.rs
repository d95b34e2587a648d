//! Edge header gateway.
//!
//! # Data Flow
//! ```text
//! Request
//!     → path captured for cache classification
//!     → origin bound?
//!         no  → fallback.rs (200 text/plain notice, returned as-is)
//!         yes → origin.fetch(request).await
//!                 → policy.rs: isolation + security headers
//!                 → policy.rs: Cache-Control by path class
//!                 → Response (origin status and body untouched)
//! ```
//!
//! # Design Decisions
//! - The gateway holds no mutable state; every call is independent
//! - Origin errors propagate unchanged to the caller
//! - Only named policy headers are written; origin headers otherwise survive

pub mod fallback;
pub mod policy;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};

use crate::origin::{AssetOrigin, OriginError};

pub use fallback::Fallback;
pub use policy::{classify_path, CacheClass};

/// Forwards requests to the asset origin and overlays the header policy.
#[derive(Debug, Clone)]
pub struct Gateway {
    origin: Option<Arc<dyn AssetOrigin>>,
    fallback: Fallback,
}

impl Gateway {
    /// Create a gateway. `origin = None` means no asset origin is bound.
    pub fn new(origin: Option<Arc<dyn AssetOrigin>>, fallback: Fallback) -> Self {
        Self { origin, fallback }
    }

    /// Whether an asset origin is bound.
    pub fn has_origin(&self) -> bool {
        self.origin.is_some()
    }

    /// Handle one request.
    pub async fn handle(&self, request: Request<Body>) -> Result<Response<Body>, OriginError> {
        let path = request.uri().path().to_owned();

        let Some(origin) = &self.origin else {
            tracing::debug!(path = %path, "No asset origin bound, serving fallback notice");
            return Ok(self.fallback.to_response());
        };

        let mut response = origin.fetch(request).await?;

        let class = classify_path(&path);
        let headers = response.headers_mut();
        policy::apply_security_headers(headers);
        policy::apply_cache_control(headers, class);

        tracing::trace!(
            path = %path,
            status = %response.status(),
            cache_class = ?class,
            "Header policy applied"
        );

        Ok(response)
    }
}
