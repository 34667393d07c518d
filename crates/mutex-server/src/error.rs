// Error handling for HTTP responses
// Wraps anyhow errors and maps MutexError variants onto status codes

use std::fmt::{Display, Formatter};

use actix_web::{HttpResponse, http::StatusCode};

pub use mutex_common::MutexError;

// Local wrapper so actix-web's ResponseError can be implemented
// (Cannot impl foreign trait for foreign type due to orphan rules)
#[derive(Debug)]
pub struct AppError {
    inner: anyhow::Error,
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(value: anyhow::Error) -> Self {
        AppError { inner: value }
    }
}

impl From<MutexError> for AppError {
    fn from(value: MutexError) -> Self {
        AppError {
            inner: anyhow::Error::new(value),
        }
    }
}

impl AppError {
    pub fn downcast_ref<E: std::error::Error + Send + Sync + 'static>(&self) -> Option<&E> {
        self.inner.downcast_ref::<E>()
    }
}

impl actix_web::error::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.downcast_ref::<MutexError>()
            .and_then(|e| StatusCode::from_u16(e.status_code()).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    // Outcome is carried by the status code alone
    fn error_response(&self) -> HttpResponse {
        HttpResponse::new(self.status_code())
    }
}
