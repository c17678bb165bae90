//! Global work budget for one traversal.
//!
//! The guard counts edges examined, not vertices. It is a one-way state
//! machine (`OK -> EXCEEDED`): once tripped every further `tick` fails, so
//! parallel scans sharing the guard all stop at the next edge.

use super::step::NO_LIMIT;
use crate::error::{Error, Result};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Default edge budget per traversal.
pub const DEFAULT_CAPACITY: i64 = 10_000_000;

/// Thread-safe edge counter with a hard ceiling.
#[derive(Debug)]
pub struct CapacityGuard {
    limit: u64,
    consumed: AtomicU64,
    exceeded: AtomicBool,
}

impl CapacityGuard {
    /// Creates a guard allowing at most `limit` edges.
    #[must_use]
    pub fn new(limit: u64) -> Self {
        Self {
            limit,
            consumed: AtomicU64::new(0),
            exceeded: AtomicBool::new(false),
        }
    }

    /// Creates a guard that never trips.
    #[must_use]
    pub fn unlimited() -> Self {
        Self::new(u64::MAX)
    }

    /// Converts a request-layer capacity. `0` means unlimited.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` for negative values.
    pub fn from_raw(capacity: i64) -> Result<Self> {
        match capacity {
            NO_LIMIT => Ok(Self::unlimited()),
            n if n > 0 => Ok(Self::new(n as u64)),
            n => Err(Error::invalid(format!(
                "capacity must be >= 0 (0 = unlimited), got {n}"
            ))),
        }
    }

    /// Records one examined edge.
    ///
    /// # Errors
    ///
    /// Returns `Error::CapacityExceeded` the instant `consumed > limit`, and
    /// on every call after that.
    pub fn tick(&self) -> Result<()> {
        if self.exceeded.load(Ordering::Acquire) {
            return Err(self.exceeded_error(self.consumed.load(Ordering::Relaxed)));
        }
        let consumed = self.consumed.fetch_add(1, Ordering::Relaxed) + 1;
        if consumed > self.limit {
            self.exceeded.store(true, Ordering::Release);
            return Err(self.exceeded_error(consumed));
        }
        Ok(())
    }

    /// Edges examined so far.
    #[must_use]
    pub fn consumed(&self) -> u64 {
        self.consumed.load(Ordering::Relaxed)
    }

    /// Configured ceiling.
    #[must_use]
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Edges still allowed before the guard trips.
    #[must_use]
    pub fn remaining(&self) -> u64 {
        self.limit.saturating_sub(self.consumed())
    }

    /// Returns true once the guard has tripped.
    #[must_use]
    pub fn is_exceeded(&self) -> bool {
        self.exceeded.load(Ordering::Acquire)
    }

    fn exceeded_error(&self, consumed: u64) -> Error {
        Error::CapacityExceeded {
            limit: self.limit,
            consumed,
        }
    }
}
