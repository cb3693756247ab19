//! Clock implementations for region timing

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::time::{duration_micros, WallTime};

/// Source of wall-clock timestamps
///
/// Readings are assumed to be non-decreasing; nothing defends against skew.
pub trait WallClock {
    /// Current timestamp
    fn now(&self) -> WallTime;
}

impl<C: WallClock + ?Sized> WallClock for &C {
    fn now(&self) -> WallTime {
        (**self).now()
    }
}

impl<C: WallClock + ?Sized> WallClock for Arc<C> {
    fn now(&self) -> WallTime {
        (**self).now()
    }
}

/// System wall clock (microseconds since the Unix epoch)
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemWallClock;

impl SystemWallClock {
    pub fn new() -> Self {
        SystemWallClock
    }
}

impl WallClock for SystemWallClock {
    fn now(&self) -> WallTime {
        // A clock set before 1970 reads as the epoch
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(since_epoch) => WallTime::from_micros(duration_micros(since_epoch)),
            Err(_) => WallTime::ZERO,
        }
    }
}

/// Manually driven clock for tests and simulation
#[derive(Debug, Default)]
pub struct ManualClock {
    micros: AtomicU64,
}

impl ManualClock {
    /// Create a clock reading `start`
    pub fn new(start: WallTime) -> Self {
        ManualClock {
            micros: AtomicU64::new(start.as_micros()),
        }
    }

    /// Jump to an absolute time
    pub fn set(&self, time: WallTime) {
        self.micros.store(time.as_micros(), Ordering::Relaxed);
    }

    /// Move forward by a duration
    pub fn advance(&self, dt: Duration) {
        self.advance_micros(duration_micros(dt));
    }

    /// Move forward by a number of microseconds
    pub fn advance_micros(&self, micros: u64) {
        let _ = self
            .micros
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |current| {
                Some(current.saturating_add(micros))
            });
    }
}

impl WallClock for ManualClock {
    fn now(&self) -> WallTime {
        WallTime::from_micros(self.micros.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_non_decreasing() {
        let clock = SystemWallClock::new();

        let t1 = clock.now();
        std::thread::sleep(Duration::from_millis(2));
        let t2 = clock.now();

        assert!(t1 > WallTime::ZERO);
        assert!(t2 >= t1);
    }

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new(WallTime::from_secs(5));

        clock.advance(Duration::from_millis(250));
        clock.advance_micros(7);

        assert_eq!(clock.now(), WallTime::from_micros(5_250_007));
    }

    #[test]
    fn test_manual_clock_shared() {
        let clock = Arc::new(ManualClock::default());
        let reader = Arc::clone(&clock);

        clock.set(WallTime::from_millis(42));

        assert_eq!(reader.now(), WallTime::from_millis(42));
    }
}
