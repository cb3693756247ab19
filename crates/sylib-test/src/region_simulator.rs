//! Region Simulator - scripted begin/end sequences on a manual clock
//!
//! Simulates:
//! - Instrumented programs bracketing regions of known duration
//! - Long-running regions crossing minute and hour boundaries
//! - Misordered calls under either region discipline

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sylib_core::{
    duration_micros, ManualClock, RegionViolation, RuntimeConfig, SourceLine, TimingRegistry,
    TimingSlot, WallClock, WallTime,
};

/// One step of an instrumented program
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegionCall {
    Begin(SourceLine),
    End(SourceLine),
    /// Time passing between calls
    Work(Duration),
}

/// Ordered call sequence with the durations each region should record
#[derive(Clone, Debug, Default)]
pub struct RegionScript {
    calls: Vec<RegionCall>,
    expected_micros: Vec<u64>,
}

impl RegionScript {
    pub fn new() -> Self {
        RegionScript::default()
    }

    /// A well-formed region doing `work` between lines
    pub fn region(mut self, begin: i32, work: Duration, end: i32) -> Self {
        self.calls.push(RegionCall::Begin(SourceLine(begin)));
        self.calls.push(RegionCall::Work(work));
        self.calls.push(RegionCall::End(SourceLine(end)));
        self.expected_micros.push(duration_micros(work));
        self
    }

    /// Untimed work between regions
    pub fn gap(mut self, work: Duration) -> Self {
        self.calls.push(RegionCall::Work(work));
        self
    }

    /// Raw call, for misuse scenarios; expectations are not tracked
    pub fn call(mut self, call: RegionCall) -> Self {
        self.calls.push(call);
        self
    }

    /// Random well-formed regions with gaps in between
    pub fn random(seed: u64, regions: usize, max_work: Duration) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let max_us = duration_micros(max_work).max(1);
        let mut script = RegionScript::new();

        for i in 0..regions {
            let line = (i as i32) * 2 + 1;
            let gap = rng.gen_range(0..=max_us);
            let work = rng.gen_range(0..=max_us);
            script = script
                .gap(Duration::from_micros(gap))
                .region(line, Duration::from_micros(work), line + 1);
        }
        script
    }

    pub fn calls(&self) -> &[RegionCall] {
        &self.calls
    }

    /// Expected microseconds per completed region, in order
    pub fn expected_micros(&self) -> &[u64] {
        &self.expected_micros
    }
}

/// Outcome of running a script
#[derive(Clone, Debug)]
pub struct SimulationResult {
    pub slots: Vec<TimingSlot>,
    pub cursor: usize,
    pub violations: Vec<RegionViolation>,
    pub elapsed: Duration,
}

impl SimulationResult {
    /// Check each slot against the expected durations and range invariants
    pub fn verify(&self, expected_micros: &[u64]) -> Result<(), String> {
        if self.slots.len() != expected_micros.len() {
            return Err(format!(
                "expected {} slots, recorded {}",
                expected_micros.len(),
                self.slots.len()
            ));
        }
        if self.cursor != self.slots.len() {
            return Err(format!(
                "cursor {} does not match {} slots",
                self.cursor,
                self.slots.len()
            ));
        }

        for (index, (slot, expected)) in self.slots.iter().zip(expected_micros).enumerate() {
            if !slot.is_normalized() {
                return Err(format!("slot {} not normalized: {:?}", index, slot));
            }
            if slot.total_micros() != *expected {
                return Err(format!(
                    "slot {} recorded {}us, expected {}us",
                    index,
                    slot.total_micros(),
                    expected
                ));
            }
        }
        Ok(())
    }
}

/// Drives a registry on a shared manual clock
pub struct RegionSimulator {
    clock: Arc<ManualClock>,
    registry: TimingRegistry<Arc<ManualClock>>,
    start: WallTime,
}

impl RegionSimulator {
    pub fn new(config: RuntimeConfig) -> Self {
        let start = WallTime::from_secs(1_700_000_000);
        let clock = Arc::new(ManualClock::new(start));
        let registry = TimingRegistry::with_config(config, Arc::clone(&clock));
        RegionSimulator {
            clock,
            registry,
            start,
        }
    }

    /// Apply every call in order
    pub fn run(&mut self, script: &RegionScript) -> SimulationResult {
        for call in script.calls() {
            self.apply(*call);
        }
        self.result()
    }

    pub fn apply(&mut self, call: RegionCall) {
        match call {
            RegionCall::Begin(line) => self.registry.begin_region(line),
            RegionCall::End(line) => self.registry.end_region(line),
            RegionCall::Work(dt) => self.clock.advance(dt),
        }
    }

    pub fn result(&self) -> SimulationResult {
        SimulationResult {
            slots: self.registry.slots().to_vec(),
            cursor: self.registry.cursor(),
            violations: self.registry.violations().to_vec(),
            elapsed: self.clock.now() - self.start,
        }
    }

    pub fn registry(&self) -> &TimingRegistry<Arc<ManualClock>> {
        &self.registry
    }
}

impl Default for RegionSimulator {
    fn default() -> Self {
        Self::new(RuntimeConfig::default())
    }
}
