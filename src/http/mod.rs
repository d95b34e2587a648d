//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID assigned or kept)
//!     → gateway (origin fetch + header policy, or fallback notice)
//!     → server.rs (origin error → 502)
//!     → Send to client
//! ```

pub mod request;
pub mod server;

pub use request::{RequestIdExt, UuidRequestId, X_REQUEST_ID};
pub use server::GatewayServer;
