//! Lock API handlers
//!
//! Each handler validates the `key` parameter, performs exactly one registry
//! operation and maps its outcome to a status code:
//! - GET /lock    - acquire write lock    (202 Accepted / 409 Conflict)
//! - GET /rlock   - acquire read lock     (202 Accepted / 409 Conflict)
//! - GET /unlock  - release write lock    (202 Accepted / 409 Conflict)
//! - GET /runlock - release read lock     (202 Accepted)
//! - GET /status  - write lock status     (200 OK / 423 Locked)
//!
//! Only the first `key` value counts. A missing or empty key yields 400 Bad
//! Request without touching the registry.
//! Responses have empty bodies. Handlers never retry.

use actix_web::{HttpResponse, http::StatusCode, web};

use mutex_common::{LockOperation, MutexError};
use mutex_core::{AcquireOutcome, LockRegistry, LockStatus, ReleaseOutcome};

use crate::{error::AppError, metrics};

use super::model::{KeyParam, LockQuery};

type HandlerResult = Result<HttpResponse, AppError>;

fn accepted() -> HttpResponse {
    HttpResponse::Accepted().finish()
}

fn acquired(op: LockOperation, key: &str, outcome: AcquireOutcome) -> HandlerResult {
    metrics::record_lock_operation(op, outcome.as_str());
    match outcome {
        AcquireOutcome::Granted => Ok(accepted()),
        AcquireOutcome::Denied => Err(MutexError::conflict(op, key).into()),
    }
}

/// GET /lock?key=
pub async fn acquire_write(
    registry: web::Data<LockRegistry>,
    query: LockQuery,
) -> HandlerResult {
    let params = KeyParam::from(query);
    let key = params.require_key()?;
    acquired(
        LockOperation::AcquireWrite,
        key,
        registry.acquire_write(key),
    )
}

/// GET /rlock?key=
pub async fn acquire_read(
    registry: web::Data<LockRegistry>,
    query: LockQuery,
) -> HandlerResult {
    let params = KeyParam::from(query);
    let key = params.require_key()?;
    acquired(LockOperation::AcquireRead, key, registry.acquire_read(key))
}

/// GET /unlock?key=
pub async fn release_write(
    registry: web::Data<LockRegistry>,
    query: LockQuery,
) -> HandlerResult {
    let params = KeyParam::from(query);
    let key = params.require_key()?;
    let outcome = registry.release_write(key);
    metrics::record_lock_operation(LockOperation::ReleaseWrite, outcome.as_str());

    match outcome {
        ReleaseOutcome::Released => Ok(accepted()),
        ReleaseOutcome::NotLocked => {
            Err(MutexError::conflict(LockOperation::ReleaseWrite, key).into())
        }
    }
}

/// GET /runlock?key=
///
/// Releasing more read locks than were taken is absorbed.
pub async fn release_read(
    registry: web::Data<LockRegistry>,
    query: LockQuery,
) -> HandlerResult {
    let params = KeyParam::from(query);
    let key = params.require_key()?;
    let outcome = registry.release_read(key);
    metrics::record_lock_operation(LockOperation::ReleaseRead, outcome.as_str());
    Ok(accepted())
}

/// GET /status?key=
pub async fn status(
    registry: web::Data<LockRegistry>,
    query: LockQuery,
) -> HandlerResult {
    let params = KeyParam::from(query);
    let key = params.require_key()?;
    let status = registry.status(key);
    metrics::record_lock_operation(LockOperation::Status, status.as_str());

    Ok(match status {
        LockStatus::Free => HttpResponse::Ok().finish(),
        LockStatus::Locked => HttpResponse::new(StatusCode::LOCKED),
    })
}
