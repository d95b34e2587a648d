//! Edge header gateway library.
//!
//! Fronts a static asset origin and overlays cross-origin isolation,
//! security and cache headers on everything it serves.

pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod origin;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use gateway::{classify_path, CacheClass, Fallback, Gateway};
pub use http::GatewayServer;
pub use lifecycle::Shutdown;
pub use origin::{AssetOrigin, OriginError};
