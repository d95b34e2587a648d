//! Local directory origin.
//!
//! Serves a built asset tree (e.g. `dist/`) in-process with `ServeDir`.
//! Missing files produce `ServeDir`'s own 404, which the gateway passes on.

use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::http::{Request, Response};
use futures_util::future::BoxFuture;
use tower::ServiceExt;
use tower_http::services::ServeDir;

use super::{AssetOrigin, OriginError};

/// Origin that maps request paths onto files under a root directory.
#[derive(Clone)]
pub struct DirectoryOrigin {
    root: PathBuf,
    serve: ServeDir,
}

impl DirectoryOrigin {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let serve = ServeDir::new(&root);
        Self { root, serve }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl std::fmt::Debug for DirectoryOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryOrigin")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl AssetOrigin for DirectoryOrigin {
    fn fetch(&self, request: Request<Body>) -> BoxFuture<'_, Result<Response<Body>, OriginError>> {
        let serve = self.serve.clone();
        Box::pin(async move {
            // ServeDir's default fallback cannot fail.
            let response = match serve.oneshot(request).await {
                Ok(response) => response,
                Err(never) => match never {},
            };
            Ok::<_, OriginError>(response.map(Body::new))
        })
    }
}
