//! Time primitives for region timing
//!
//! Timestamps are wall-clock readings in whole microseconds since the Unix
//! epoch, the resolution `gettimeofday` gives.

use std::ops::{Add, Sub};
use std::time::Duration;

pub const MICROS_PER_SECOND: u64 = 1_000_000;
pub const SECONDS_PER_MINUTE: u64 = 60;
pub const MINUTES_PER_HOUR: u64 = 60;

/// Wall-clock timestamp in microseconds since the Unix epoch
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct WallTime(pub u64);

impl WallTime {
    pub const ZERO: WallTime = WallTime(0);

    #[inline]
    pub fn from_micros(micros: u64) -> Self {
        WallTime(micros)
    }

    #[inline]
    pub fn from_millis(millis: u64) -> Self {
        WallTime(millis.saturating_mul(1000))
    }

    #[inline]
    pub fn from_secs(secs: u64) -> Self {
        WallTime(secs.saturating_mul(MICROS_PER_SECOND))
    }

    #[inline]
    pub fn as_micros(self) -> u64 {
        self.0
    }

    /// Whole microseconds elapsed since `earlier`, zero if `earlier` is later
    #[inline]
    pub fn micros_since(self, earlier: WallTime) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    #[inline]
    pub fn saturating_add(self, duration: Duration) -> Self {
        WallTime(self.0.saturating_add(duration_micros(duration)))
    }
}

impl Add<Duration> for WallTime {
    type Output = WallTime;

    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        self.saturating_add(rhs)
    }
}

impl Sub<WallTime> for WallTime {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: WallTime) -> Self::Output {
        Duration::from_micros(self.micros_since(rhs))
    }
}

impl std::fmt::Debug for WallTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "wall({}.{:06}s)",
            self.0 / MICROS_PER_SECOND,
            self.0 % MICROS_PER_SECOND
        )
    }
}

/// Whole microseconds in a duration, clamped to `u64`
#[inline]
pub fn duration_micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}

/// Opaque source-location token passed by instrumented code
///
/// Purely diagnostic: it is stored in slots and never used in arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SourceLine(pub i32);

impl SourceLine {
    /// Location of a slot side that no call has reported
    pub const UNKNOWN: SourceLine = SourceLine(0);

    #[inline]
    pub fn new(line: i32) -> Self {
        SourceLine(line)
    }

    #[inline]
    pub fn get(self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for SourceLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}", self.0)
    }
}
