//! Timestamps for inode bookkeeping.
//!
//! The file system never reads the wall clock directly; it asks a [`Clock`],
//! so hosts without `std` (or tests that want deterministic times) can plug
//! in their own source.

use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

/// Nanoseconds per second
pub const NSEC_PER_SEC: u64 = 1_000_000_000;

/// Nanoseconds since the Unix epoch.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub const EPOCH: Self = Self(0);

    #[inline]
    pub const fn from_nanos(nanos: u64) -> Self {
        Self(nanos)
    }

    #[inline]
    pub const fn from_secs(secs: u64) -> Self {
        Self(secs.saturating_mul(NSEC_PER_SEC))
    }

    #[inline]
    pub const fn as_nanos(self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn secs(self) -> u64 {
        self.0 / NSEC_PER_SEC
    }

    #[inline]
    pub const fn subsec_nanos(self) -> u32 {
        (self.0 % NSEC_PER_SEC) as u32
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({}.{:09})", self.secs(), self.subsec_nanos())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:09}", self.secs(), self.subsec_nanos())
    }
}

/// Source of inode timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall clock backed by `std::time::SystemTime`.
#[cfg(feature = "std")]
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

#[cfg(feature = "std")]
impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        // A clock set before 1970 collapses to the epoch.
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| Timestamp::from_nanos(d.as_nanos() as u64))
            .unwrap_or(Timestamp::EPOCH)
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    nanos: AtomicU64,
}

impl ManualClock {
    pub const fn new(start: Timestamp) -> Self {
        Self {
            nanos: AtomicU64::new(start.0),
        }
    }

    pub fn set(&self, ts: Timestamp) {
        self.nanos.store(ts.0, Ordering::Relaxed);
    }

    pub fn advance_secs(&self, secs: u64) {
        let delta = secs.saturating_mul(NSEC_PER_SEC);
        let _ = self
            .nanos
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| Some(n.saturating_add(delta)));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_nanos(self.nanos.load(Ordering::Relaxed))
    }
}

impl<C: Clock + ?Sized> Clock for alloc::sync::Arc<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_parts() {
        let ts = Timestamp::from_nanos(1_704_067_200 * NSEC_PER_SEC + 500_000_000);
        assert_eq!(ts.secs(), 1_704_067_200);
        assert_eq!(ts.subsec_nanos(), 500_000_000);
        assert!(Timestamp::from_secs(1) > Timestamp::EPOCH);
    }

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(Timestamp::from_secs(10));
        assert_eq!(clock.now(), Timestamp::from_secs(10));
        clock.advance_secs(5);
        assert_eq!(clock.now(), Timestamp::from_secs(15));
        clock.set(Timestamp::EPOCH);
        assert_eq!(clock.now().as_nanos(), 0);
    }

    #[test]
    fn test_large_seconds_saturate() {
        assert_eq!(Timestamp::from_secs(u64::MAX), Timestamp(u64::MAX));
        let clock = ManualClock::new(Timestamp::from_secs(10));
        clock.advance_secs(u64::MAX);
        assert_eq!(clock.now(), Timestamp(u64::MAX));
        clock.advance_secs(1);
        assert_eq!(clock.now(), Timestamp(u64::MAX));
    }
}
