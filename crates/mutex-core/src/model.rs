// Lock state and operation outcome types

/// Lock facts tracked for a single key.
///
/// The two fields are independent; mutual exclusion between writers and
/// readers is enforced only by the acquire guards in the registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LockState {
    pub writer_held: bool,
    pub reader_count: u64,
}

impl LockState {
    /// Guard for a write acquisition
    pub fn can_write(&self) -> bool {
        !self.writer_held && self.reader_count == 0
    }

    /// Guard for a read acquisition
    pub fn can_read(&self) -> bool {
        !self.writer_held
    }

    /// Equivalent to an absent key
    pub fn is_idle(&self) -> bool {
        !self.writer_held && self.reader_count == 0
    }
}

/// Result of an acquire operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquireOutcome {
    Granted,
    Denied,
}

impl AcquireOutcome {
    pub fn is_granted(&self) -> bool {
        matches!(self, AcquireOutcome::Granted)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AcquireOutcome::Granted => "granted",
            AcquireOutcome::Denied => "denied",
        }
    }
}

/// Result of a release operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    Released,
    NotLocked,
}

impl ReleaseOutcome {
    pub fn is_released(&self) -> bool {
        matches!(self, ReleaseOutcome::Released)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseOutcome::Released => "released",
            ReleaseOutcome::NotLocked => "not_locked",
        }
    }
}

/// Status reported for a key. Only a held write lock counts as `Locked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockStatus {
    Free,
    Locked,
}

impl LockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LockStatus::Free => "free",
            LockStatus::Locked => "locked",
        }
    }
}

/// Point-in-time summary of the registry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LockStats {
    /// Keys with any lock held
    pub tracked_keys: usize,
    /// Keys with a write lock held
    pub write_locked: usize,
    /// Outstanding read locks across all keys
    pub total_readers: u64,
}
