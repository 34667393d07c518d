//! Main entry point for the mutex server.
//!
//! Loads configuration, initializes logging and metrics, then serves the lock
//! API until a shutdown signal arrives.

use std::sync::Arc;

use mutex_server::{Configuration, LockRegistry, startup};
use tracing::{error, info};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let configuration = Configuration::new()?;

    let _logging_guard = startup::init_logging(&configuration.logging_config())?;

    mutex_server::metrics::init_metrics();

    // One registry per process, shared by every worker
    let registry = Arc::new(LockRegistry::new());

    let server = startup::lock_server(registry, &configuration).map_err(|e| {
        error!(
            address = %configuration.server_address(),
            port = configuration.server_port(),
            "Failed to bind lock server: {}",
            e
        );
        e
    })?;

    match startup::serve_until(server, startup::shutdown_signal()).await {
        Ok(Some(reason)) => info!(
            reason = reason.as_str(),
            timeout_secs = configuration.shutdown_timeout_secs(),
            "Lock server stopped"
        ),
        Ok(None) => info!("Lock server stopped"),
        Err(e) => {
            error!("Lock server error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
