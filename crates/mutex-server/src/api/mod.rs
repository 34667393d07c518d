// HTTP API handlers and routes

pub mod health; // Liveness check
pub mod lock; // Lock operation handlers
pub mod model; // Request parameter models
pub mod route; // Route table
