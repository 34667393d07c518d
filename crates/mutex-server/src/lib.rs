// Main library module for the mutex service - advisory read/write locks over HTTP
// The lock registry lives in mutex-core; this crate carries the transport around it

// Module declarations
pub mod api; // HTTP handlers and routes
pub mod error; // Error handling and response mapping
pub mod metrics; // Metrics and observability
pub mod middleware; // HTTP middleware
pub mod model; // Configuration and request models
pub mod startup; // Application startup utilities

// Re-export common types for convenience
pub use model::config::{Configuration, ServerArgs};
pub use mutex_common::{LockOperation, MutexError};
pub use mutex_core::LockRegistry;
