//! Mutex Core - Advisory lock registry
//!
//! This crate provides:
//! - `LockRegistry`: per-key write flag and reader count behind a single
//!   readers-writer guard
//! - Outcome types returned by every registry operation
//! - `LockStats` snapshots for diagnostics and benchmarks

pub mod model;
pub mod registry;

pub use model::{AcquireOutcome, LockState, LockStats, LockStatus, ReleaseOutcome};
pub use registry::LockRegistry;
