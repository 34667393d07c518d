// In-memory advisory lock registry
// All keys share one readers-writer guard; every operation is a single critical section

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use crate::model::{AcquireOutcome, LockState, LockStats, LockStatus, ReleaseOutcome};

/// Registry of per-key lock state.
///
/// Mutations take the exclusive side of the guard for their whole
/// check-and-mutate step; status queries take the shared side. No operation
/// holds the guard across a call that can block, and none takes a second lock.
///
/// Keys whose state returns to idle are pruned, so an absent key and an idle
/// key are indistinguishable. The registry does not record who holds a lock.
#[derive(Debug, Default)]
pub struct LockRegistry {
    entries: RwLock<HashMap<String, LockState>>,
}

impl LockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the write lock on `key` if no writer and no readers hold it.
    pub fn acquire_write(&self, key: &str) -> AcquireOutcome {
        let outcome = {
            let mut entries = self.entries.write();
            let state = entries.get(key).copied().unwrap_or_default();
            if state.can_write() {
                entries.entry(key.to_owned()).or_default().writer_held = true;
                AcquireOutcome::Granted
            } else {
                AcquireOutcome::Denied
            }
        };

        debug!(key = %key, outcome = outcome.as_str(), "Write lock acquire");
        outcome
    }

    /// Add a reader to `key` if no writer holds it.
    pub fn acquire_read(&self, key: &str) -> AcquireOutcome {
        let outcome = {
            let mut entries = self.entries.write();
            let state = entries.get(key).copied().unwrap_or_default();
            if state.can_read() {
                entries.entry(key.to_owned()).or_default().reader_count += 1;
                AcquireOutcome::Granted
            } else {
                AcquireOutcome::Denied
            }
        };

        debug!(key = %key, outcome = outcome.as_str(), "Read lock acquire");
        outcome
    }

    /// Clear the write lock on `key`. Any caller may release.
    pub fn release_write(&self, key: &str) -> ReleaseOutcome {
        let outcome = {
            let mut entries = self.entries.write();
            match entries.get_mut(key) {
                Some(state) if state.writer_held => {
                    state.writer_held = false;
                    if state.is_idle() {
                        entries.remove(key);
                    }
                    ReleaseOutcome::Released
                }
                _ => ReleaseOutcome::NotLocked,
            }
        };

        debug!(key = %key, outcome = outcome.as_str(), "Write lock release");
        outcome
    }

    /// Remove one reader from `key`.
    ///
    /// Always reports `Released`; releasing a key with no readers is a no-op.
    pub fn release_read(&self, key: &str) -> ReleaseOutcome {
        let decremented = {
            let mut entries = self.entries.write();
            match entries.get_mut(key) {
                Some(state) if state.reader_count > 0 => {
                    state.reader_count -= 1;
                    if state.is_idle() {
                        entries.remove(key);
                    }
                    true
                }
                _ => false,
            }
        };

        debug!(key = %key, decremented, "Read lock release");
        ReleaseOutcome::Released
    }

    /// `Locked` iff a write lock is held on `key`; readers are not reported.
    pub fn status(&self, key: &str) -> LockStatus {
        let entries = self.entries.read();
        match entries.get(key) {
            Some(state) if state.writer_held => LockStatus::Locked,
            _ => LockStatus::Free,
        }
    }

    /// Current state of `key`, idle if absent
    pub fn state(&self, key: &str) -> LockState {
        self.entries.read().get(key).copied().unwrap_or_default()
    }

    pub fn stats(&self) -> LockStats {
        let entries = self.entries.read();
        entries.values().fold(
            LockStats {
                tracked_keys: entries.len(),
                ..Default::default()
            },
            |mut stats, state| {
                if state.writer_held {
                    stats.write_locked += 1;
                }
                stats.total_readers += state.reader_count;
                stats
            },
        )
    }
}
