// Lock API route configuration
// Maps HTTP routes to handler functions

use actix_web::web;

use mutex_common::{LockOperation, constants::HEALTH_ROUTE};

use super::{health, lock};

/// All service routes. Every route answers GET only.
pub fn routes() -> actix_web::Scope {
    web::scope("")
        .route(HEALTH_ROUTE, web::get().to(health::health))
        .route(
            LockOperation::AcquireWrite.route(),
            web::get().to(lock::acquire_write),
        )
        .route(
            LockOperation::AcquireRead.route(),
            web::get().to(lock::acquire_read),
        )
        .route(
            LockOperation::ReleaseWrite.route(),
            web::get().to(lock::release_write),
        )
        .route(
            LockOperation::ReleaseRead.route(),
            web::get().to(lock::release_read),
        )
        .route(LockOperation::Status.route(), web::get().to(lock::status))
}
