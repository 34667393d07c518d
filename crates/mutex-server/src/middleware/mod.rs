// HTTP middleware implementations
// Cross-cutting concerns applied around route dispatch, independent of lock logic

pub mod request_log; // Per-request logging and HTTP metrics

use actix_web::{http::header, middleware::DefaultHeaders};

pub use request_log::RequestLogger;

/// Permissive cross-origin header attached to every response
pub fn cors() -> DefaultHeaders {
    DefaultHeaders::new().add((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
}
