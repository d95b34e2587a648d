//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events with structured fields
//!     → TraceLayer spans per request (http/server.rs)
//!
//! Consumers:
//!     → logging.rs (fmt subscriber on stdout)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through the request span and the response
//! - The gateway core only logs at debug/trace; lifecycle logs at info

pub mod logging;

pub use logging::init_logging;
