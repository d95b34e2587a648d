//! Upstream HTTP origin.
//!
//! # Responsibilities
//! - Forward requests to a static-file server over HTTP
//! - Stream bodies in both directions without buffering
//!
//! # Design Decisions
//! - Only scheme and authority of the URI are rewritten; method, path,
//!   query, headers and body pass through untouched
//! - Requests go upstream as HTTP/1.1 regardless of the inbound version
//! - No retries and no timeout here; both belong to the caller

use axum::body::Body;
use axum::http::uri::Scheme;
use axum::http::{Request, Response, Uri, Version};
use futures_util::future::BoxFuture;
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use url::Url;

use super::{AssetOrigin, OriginError};

/// Origin backed by an upstream HTTP server.
#[derive(Clone)]
pub struct HttpOrigin {
    client: Client<HttpConnector, Body>,
    authority: String,
}

impl HttpOrigin {
    /// Create an origin for the given `http://host[:port]` base URL.
    ///
    /// The URL is expected to have passed config validation; a missing port
    /// falls back to 80.
    pub fn new(url: &Url) -> Self {
        let host = url.host_str().unwrap_or("localhost");
        let port = url.port_or_known_default().unwrap_or(80);

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        Self {
            client,
            authority: format!("{}:{}", host, port),
        }
    }

    /// The `host:port` requests are forwarded to.
    pub fn authority(&self) -> &str {
        &self.authority
    }

    fn upstream_uri(&self, original: &Uri) -> Result<Uri, OriginError> {
        let path_and_query = original
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");

        let uri = Uri::builder()
            .scheme(Scheme::HTTP)
            .authority(self.authority.as_str())
            .path_and_query(path_and_query)
            .build()?;
        Ok(uri)
    }

    async fn forward(&self, request: Request<Body>) -> Result<Response<Body>, OriginError> {
        let (mut parts, body) = request.into_parts();
        parts.uri = self.upstream_uri(&parts.uri)?;
        parts.version = Version::HTTP_11;

        tracing::trace!(uri = %parts.uri, method = %parts.method, "Forwarding to upstream origin");

        let response: Response<Incoming> =
            self.client.request(Request::from_parts(parts, body)).await?;
        let (parts, body) = response.into_parts();
        Ok(Response::from_parts(parts, Body::new(body)))
    }
}

impl std::fmt::Debug for HttpOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpOrigin")
            .field("authority", &self.authority)
            .finish_non_exhaustive()
    }
}

impl AssetOrigin for HttpOrigin {
    fn fetch(&self, request: Request<Body>) -> BoxFuture<'_, Result<Response<Body>, OriginError>> {
        Box::pin(self.forward(request))
    }
}
