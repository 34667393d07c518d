//! Error types for the mutex service
//!
//! `MutexError` covers every failure a request or the startup path can
//! produce. The HTTP layer maps each variant to a status code.

use crate::LockOperation;

/// Application-specific error types
#[derive(thiserror::Error, Debug)]
pub enum MutexError {
    #[error("required parameter 'key' is missing")]
    MissingKey,

    #[error("{op} conflict on key '{key}'")]
    Conflict { op: LockOperation, key: String },

    #[error("configuration error: {0}")]
    Config(String),
}

impl MutexError {
    pub fn conflict(op: LockOperation, key: impl Into<String>) -> Self {
        MutexError::Conflict {
            op,
            key: key.into(),
        }
    }

    /// HTTP status code this error is reported with
    pub fn status_code(&self) -> u16 {
        match self {
            MutexError::MissingKey => 400,
            MutexError::Conflict { .. } => 409,
            MutexError::Config(_) => 500,
        }
    }
}
