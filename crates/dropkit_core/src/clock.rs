//! Millisecond time sources
//!
//! Everything time-dependent in Dropkit (debounce windows, cache TTLs) reads
//! time through a [`Clock`] instead of calling the system directly. Hosts use
//! [`SystemClock`]; tests use [`ManualClock`] and advance it explicitly.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// A source of the current time in milliseconds
pub trait Clock: Send + Sync {
    /// Current time in milliseconds.
    ///
    /// Must be monotonic non-decreasing for a given clock instance.
    fn now_ms(&self) -> u64;
}

/// Shared clock handle
pub type SharedClock = Arc<dyn Clock>;

/// Wall-clock time since the Unix epoch.
///
/// Wall time (rather than `Instant`) keeps timestamps comparable across
/// process restarts, which persisted cache entries rely on.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a shared system clock
    pub fn shared() -> SharedClock {
        Arc::new(SystemClock)
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// A clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: AtomicU64::new(start_ms),
        }
    }

    /// Create a shared manual clock.
    ///
    /// Returns the concrete handle so tests can keep advancing it after
    /// handing a `SharedClock` to the code under test.
    pub fn shared(start_ms: u64) -> Arc<ManualClock> {
        Arc::new(Self::new(start_ms))
    }

    /// Move time forward by `ms`
    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }

    /// Jump to an absolute time. Ignored if it would move time backwards.
    pub fn set(&self, ms: u64) {
        self.now.fetch_max(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}
