//! Timing slots - accumulated region durations
//!
//! A slot holds the elapsed time of one begin/end region broken into
//! hour/minute/second/microsecond fields.
//!
//! INVARIANT (after normalization):
//! - microseconds < 1_000_000
//! - seconds < 60
//! - minutes < 60
//! - hours is unbounded

use std::time::Duration;

use crate::time::{SourceLine, MICROS_PER_SECOND, MINUTES_PER_HOUR, SECONDS_PER_MINUTE};

/// Accumulated duration for one region
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimingSlot {
    /// Location reported by the begin call
    pub start_line: SourceLine,
    /// Location reported by the end call
    pub stop_line: SourceLine,
    pub microseconds: u64,
    pub seconds: u64,
    pub minutes: u64,
    pub hours: u64,
}

impl TimingSlot {
    /// Empty slot opened at `start_line`
    pub fn new(start_line: SourceLine) -> Self {
        TimingSlot {
            start_line,
            ..Default::default()
        }
    }

    /// Add elapsed microseconds, then carry into the larger units
    ///
    /// Durations add up: repeated calls sum rather than overwrite.
    pub fn accumulate(&mut self, elapsed_us: u64) {
        self.microseconds = self.microseconds.saturating_add(elapsed_us);
        self.normalize();
    }

    /// Carry overflow upward: micro -> sec -> min -> hour, in that order
    pub fn normalize(&mut self) {
        self.seconds = self
            .seconds
            .saturating_add(self.microseconds / MICROS_PER_SECOND);
        self.microseconds %= MICROS_PER_SECOND;

        self.minutes = self
            .minutes
            .saturating_add(self.seconds / SECONDS_PER_MINUTE);
        self.seconds %= SECONDS_PER_MINUTE;

        self.hours = self.hours.saturating_add(self.minutes / MINUTES_PER_HOUR);
        self.minutes %= MINUTES_PER_HOUR;
    }

    /// Check the per-field range invariant
    pub fn is_normalized(&self) -> bool {
        self.microseconds < MICROS_PER_SECOND
            && self.seconds < SECONDS_PER_MINUTE
            && self.minutes < MINUTES_PER_HOUR
    }

    /// Whole seconds across the hour/minute/second fields
    pub fn total_seconds(&self) -> u64 {
        self.hours
            .saturating_mul(MINUTES_PER_HOUR * SECONDS_PER_MINUTE)
            .saturating_add(self.minutes.saturating_mul(SECONDS_PER_MINUTE))
            .saturating_add(self.seconds)
    }

    /// Total duration in microseconds (saturating)
    pub fn total_micros(&self) -> u64 {
        self.total_seconds()
            .saturating_mul(MICROS_PER_SECOND)
            .saturating_add(self.microseconds)
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(self.total_seconds())
            .checked_add(Duration::from_micros(self.microseconds))
            .unwrap_or(Duration::MAX)
    }
}
