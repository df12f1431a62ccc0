//! Time source for expiry checks.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of "now" in epoch seconds.
///
/// Node expiry is an absolute epoch timestamp, so the engine needs wall
/// time. Taking it through a trait keeps expiry behavior deterministic
/// in tests ([`FixedClock`]) and lets hosts substitute their own time
/// authority.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Current time in seconds since the Unix epoch.
    fn now_seconds(&self) -> u64;
}

/// The process wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_seconds(&self) -> u64 {
        // A clock before the epoch reads as zero rather than failing.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// A manually driven clock for deterministic tests.
///
/// # Example
///
/// ```
/// use strata_engine::{Clock, FixedClock};
///
/// let clock = FixedClock::at(100);
/// assert_eq!(clock.now_seconds(), 100);
/// clock.advance(5);
/// assert_eq!(clock.now_seconds(), 105);
/// ```
#[derive(Debug, Default)]
pub struct FixedClock {
    seconds: AtomicU64,
}

impl FixedClock {
    /// Creates a clock frozen at the given instant.
    #[must_use]
    pub fn at(seconds: u64) -> Self {
        Self {
            seconds: AtomicU64::new(seconds),
        }
    }

    /// Moves the clock forward.
    pub fn advance(&self, seconds: u64) {
        self.seconds.fetch_add(seconds, Ordering::SeqCst);
    }

    /// Jumps the clock to an absolute instant.
    pub fn set(&self, seconds: u64) {
        self.seconds.store(seconds, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_seconds(&self) -> u64 {
        self.seconds.load(Ordering::SeqCst)
    }
}
