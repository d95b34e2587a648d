//! Informational response served when no asset origin is bound.

use axum::body::Body;
use axum::http::{header, HeaderValue, Response, StatusCode};

use crate::config::FallbackConfig;

/// Content type of the fallback response.
pub const FALLBACK_CONTENT_TYPE: &str = "text/plain";

/// Plain-text notice pointing the operator at the right dev command.
///
/// Built once from configuration and cloned into each response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fallback {
    message: String,
}

impl Fallback {
    /// Render the notice from the configured command and application names.
    pub fn new(config: &FallbackConfig) -> Self {
        let message = format!(
            "Local development mode: Please use \"{dev}\" for local development instead of \"{worker}\".\n\n\
             The Cloudflare Workers local dev server is primarily for testing Worker logic.\n\
             For {app} development, use the Vite dev server: {dev}",
            dev = config.dev_command,
            worker = config.worker_dev_command,
            app = config.app_name,
        );
        Self { message }
    }

    /// The rendered message body.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Build the `200 text/plain` response. No policy headers are attached.
    pub fn to_response(&self) -> Response<Body> {
        let mut response = Response::new(Body::from(self.message.clone()));
        *response.status_mut() = StatusCode::OK;
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(FALLBACK_CONTENT_TYPE),
        );
        response
    }
}

impl Default for Fallback {
    fn default() -> Self {
        Self::new(&FallbackConfig::default())
    }
}
