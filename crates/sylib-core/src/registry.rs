//! Timing Registry - ordered slots indexed by a monotonic cursor
//!
//! Instrumented code brackets a region with `begin_region` / `end_region`.
//! Each completed pair fills the slot at the cursor and advances it, so slots
//! are populated in strict open/close order.
//!
//! The registry is single-thread confined: every mutation takes `&mut self`
//! and there is no internal synchronization.

use crate::clock::{SystemWallClock, WallClock};
use crate::config::{RegionDiscipline, RuntimeConfig};
use crate::error::{RegionViolation, SylibError, SylibResult};
use crate::slot::TimingSlot;
use crate::time::{SourceLine, WallTime};

/// Alternation state tracked under checked discipline
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionState {
    /// No region open; next call should be a begin
    Idle,
    /// A begin at this line is waiting for its end
    Open(SourceLine),
}

/// Process-wide timing registry
pub struct TimingRegistry<C: WallClock = SystemWallClock> {
    clock: C,
    config: RuntimeConfig,
    /// Completed slots; `slots.len() == cursor`
    slots: Vec<TimingSlot>,
    /// Index the next begin/end pair targets
    cursor: usize,
    /// Start timestamp of the most recent begin
    start: WallTime,
    /// Line reported by the pending begin, cleared on end
    start_line: SourceLine,
    state: RegionState,
    violations: Vec<RegionViolation>,
}

impl TimingRegistry<SystemWallClock> {
    /// Registry on the system clock with default configuration
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default(), SystemWallClock)
    }
}

impl Default for TimingRegistry<SystemWallClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: WallClock> TimingRegistry<C> {
    /// Registry on a custom clock
    pub fn with_clock(clock: C) -> Self {
        Self::with_config(RuntimeConfig::default(), clock)
    }

    /// Registry with custom configuration and clock
    pub fn with_config(config: RuntimeConfig, clock: C) -> Self {
        // An end with no begin measures from construction
        let start = clock.now();

        let mut slots = Vec::new();
        if let Err(e) = slots.try_reserve(config.slot_capacity) {
            tracing::warn!(capacity = config.slot_capacity, error = %e, "slot preallocation failed");
        }

        TimingRegistry {
            slots,
            clock,
            config,
            cursor: 0,
            start,
            start_line: SourceLine::UNKNOWN,
            state: RegionState::Idle,
            violations: Vec::new(),
        }
    }

    /// Record the start of a region at the current cursor
    ///
    /// Does not advance the cursor.
    pub fn begin_region(&mut self, line: SourceLine) {
        if self.config.discipline == RegionDiscipline::Checked {
            if let RegionState::Open(open) = self.state {
                self.report(RegionViolation::NestedBegin {
                    slot: self.cursor,
                    open,
                    start: line,
                });
            }
            self.state = RegionState::Open(line);
        }

        self.start_line = line;
        self.start = self.clock.now();
    }

    /// Close the region at the cursor, accumulate its duration and advance
    pub fn end_region(&mut self, line: SourceLine) {
        let stop = self.clock.now();

        if self.config.discipline == RegionDiscipline::Checked {
            if self.state == RegionState::Idle {
                self.report(RegionViolation::EndWithoutBegin {
                    slot: self.cursor,
                    stop: line,
                });
            }
            self.state = RegionState::Idle;
        }

        let elapsed_us = stop.micros_since(self.start);
        let index = self.cursor;
        debug_assert_eq!(index, self.slots.len());
        self.slots.push(TimingSlot::new(self.start_line));

        let slot = &mut self.slots[index];
        slot.stop_line = line;
        slot.accumulate(elapsed_us);

        tracing::trace!(
            slot = index,
            start_line = slot.start_line.get(),
            stop_line = line.get(),
            elapsed_us,
            "region closed"
        );

        self.start_line = SourceLine::UNKNOWN;
        self.cursor += 1;
    }

    fn report(&mut self, violation: RegionViolation) {
        tracing::warn!(slot = violation.slot(), "{}", violation);
        self.violations.push(violation);
    }

    /// Completed slots in open/close order
    pub fn slots(&self) -> &[TimingSlot] {
        &self.slots
    }

    /// Slot at `index`, if that many regions have completed
    pub fn slot(&self, index: usize) -> SylibResult<&TimingSlot> {
        self.slots.get(index).ok_or(SylibError::SlotOutOfRange {
            index,
            len: self.slots.len(),
        })
    }

    /// Index the next region will fill
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of completed slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Alternation state (always `Idle` under permissive discipline)
    pub fn state(&self) -> RegionState {
        self.state
    }

    /// Diagnostics recorded under checked discipline
    pub fn violations(&self) -> &[RegionViolation] {
        &self.violations
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }
}
