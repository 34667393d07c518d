//! Application startup utilities module.
//!
//! Logging initialization, HTTP server construction and shutdown signalling.

mod http;
mod logging;
mod shutdown;

pub use http::lock_server;
pub use logging::{LogRotation, LoggingConfig, LoggingGuard, init_logging};
pub use shutdown::{ShutdownReason, serve_until, shutdown_signal};
