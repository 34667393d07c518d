//! HTTP server setup.

use std::sync::Arc;

use actix_web::{App, HttpServer, dev::Server, web};
use tracing::info;

use mutex_core::LockRegistry;

use crate::{
    api::route::routes,
    middleware::{RequestLogger, cors},
    model::config::Configuration,
};

/// Creates and binds the lock HTTP server.
///
/// Every worker shares the single `registry`. Binding failures are returned
/// to the caller, which treats them as fatal. Process signals are handled by
/// the caller rather than by actix.
pub fn lock_server(
    registry: Arc<LockRegistry>,
    configuration: &Configuration,
) -> Result<Server, std::io::Error> {
    let address = configuration.server_address();
    let port = configuration.server_port();

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(RequestLogger::new())
            .wrap(cors())
            .app_data(web::Data::from(registry.clone()))
            .service(routes())
    })
    .disable_signals()
    .shutdown_timeout(configuration.shutdown_timeout_secs());

    if let Some(workers) = configuration.workers() {
        server = server.workers(workers);
    }

    let server = server.bind((address.as_str(), port))?;
    info!(address = %address, port, "Lock server listening");

    Ok(server.run())
}
