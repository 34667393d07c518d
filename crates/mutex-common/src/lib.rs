//! Mutex Common - Shared types and utilities
//!
//! This crate provides:
//! - Error types (`MutexError`)
//! - Lock operation identifiers used for routing, logging and metrics
//! - Shared constants (routes, configuration keys, defaults)

pub mod constants;
pub mod error;

pub use error::MutexError;

/// Lock operations exposed by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockOperation {
    AcquireWrite,
    AcquireRead,
    ReleaseWrite,
    ReleaseRead,
    Status,
}

impl LockOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            LockOperation::AcquireWrite => "acquire_write",
            LockOperation::AcquireRead => "acquire_read",
            LockOperation::ReleaseWrite => "release_write",
            LockOperation::ReleaseRead => "release_read",
            LockOperation::Status => "status",
        }
    }

    /// Route path segment serving this operation
    pub fn route(&self) -> &'static str {
        match self {
            LockOperation::AcquireWrite => "/lock",
            LockOperation::AcquireRead => "/rlock",
            LockOperation::ReleaseWrite => "/unlock",
            LockOperation::ReleaseRead => "/runlock",
            LockOperation::Status => "/status",
        }
    }
}

impl std::fmt::Display for LockOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
