//! Lifecycle hooks bracketing the instrumented program
//!
//! Start hooks run once before the program's entry point, exit hooks once
//! after it returns. With nothing registered both phases do nothing; exit
//! hooks are where a consumer reads the recorded slots.

use crate::clock::WallClock;
use crate::config::RuntimeConfig;
use crate::registry::TimingRegistry;
use crate::slot::TimingSlot;

/// Hook run before the program starts
pub type StartHook = Box<dyn FnOnce() + Send + 'static>;

/// Hook run at teardown with the recorded slots
pub type ExitHook = Box<dyn FnOnce(&[TimingSlot]) + Send + 'static>;

/// Registered lifecycle hooks
#[derive(Default)]
pub struct Lifecycle {
    on_start: Vec<StartHook>,
    on_exit: Vec<ExitHook>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Lifecycle::default()
    }

    /// Register a start hook
    pub fn on_start<F>(&mut self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.on_start.push(Box::new(f));
    }

    /// Register an exit hook
    pub fn on_exit<F>(&mut self, f: F)
    where
        F: FnOnce(&[TimingSlot]) + Send + 'static,
    {
        self.on_exit.push(Box::new(f));
    }

    /// Run and drain start hooks in registration order
    pub fn run_start(&mut self) {
        let hooks = std::mem::take(&mut self.on_start);
        tracing::debug!(hooks = hooks.len(), "running start hooks");
        for hook in hooks {
            hook();
        }
    }

    /// Run and drain exit hooks in registration order
    pub fn run_exit(&mut self, slots: &[TimingSlot]) {
        let hooks = std::mem::take(&mut self.on_exit);
        tracing::debug!(hooks = hooks.len(), slots = slots.len(), "running exit hooks");
        for hook in hooks {
            hook(slots);
        }
    }

    pub fn pending_exit_hooks(&self) -> usize {
        self.on_exit.len()
    }
}

/// One registry plus its lifecycle, constructed at program start
pub struct Runtime<C: WallClock> {
    registry: TimingRegistry<C>,
    lifecycle: Lifecycle,
    finished: bool,
}

impl<C: WallClock> Runtime<C> {
    /// Construct the registry and run start hooks
    pub fn start(config: RuntimeConfig, clock: C, mut lifecycle: Lifecycle) -> Self {
        tracing::debug!(
            discipline = ?config.discipline,
            slot_capacity = config.slot_capacity,
            "runtime starting"
        );
        let registry = TimingRegistry::with_config(config, clock);
        lifecycle.run_start();
        Runtime {
            registry,
            lifecycle,
            finished: false,
        }
    }

    pub fn registry(&self) -> &TimingRegistry<C> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut TimingRegistry<C> {
        &mut self.registry
    }

    /// Register an exit hook after start
    pub fn on_exit<F>(&mut self, f: F)
    where
        F: FnOnce(&[TimingSlot]) + Send + 'static,
    {
        self.lifecycle.on_exit(f);
    }

    /// Run exit hooks with the recorded slots; later calls do nothing
    pub fn finish(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;
        tracing::debug!(
            slots = self.registry.len(),
            violations = self.registry.violations().len(),
            "runtime finishing"
        );
        self.lifecycle.run_exit(self.registry.slots());
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::time::{SourceLine, WallTime};
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_empty_lifecycle_is_noop() {
        let mut runtime = Runtime::start(
            RuntimeConfig::default(),
            ManualClock::default(),
            Lifecycle::new(),
        );
        runtime.finish();

        assert!(runtime.is_finished());
        assert!(runtime.registry().is_empty());
    }

    #[test]
    fn test_hooks_run_in_order_once() {
        let log = Arc::new(Mutex::new(Vec::new()));

        let mut lifecycle = Lifecycle::new();
        let l = Arc::clone(&log);
        lifecycle.on_start(move || l.lock().unwrap().push("start".to_string()));
        let l = Arc::clone(&log);
        lifecycle.on_exit(move |slots| l.lock().unwrap().push(format!("exit-a {}", slots.len())));

        let mut runtime = Runtime::start(
            RuntimeConfig::default(),
            ManualClock::new(WallTime::from_secs(1)),
            lifecycle,
        );
        let l = Arc::clone(&log);
        runtime.on_exit(move |_| l.lock().unwrap().push("exit-b".to_string()));

        let reg = runtime.registry_mut();
        reg.begin_region(SourceLine(3));
        reg.clock().advance_micros(12);
        reg.end_region(SourceLine(4));

        runtime.finish();
        runtime.finish();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["start".to_string(), "exit-a 1".to_string(), "exit-b".to_string()]
        );
    }

    #[test]
    fn test_exit_hook_sees_slots() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut runtime = Runtime::start(
            RuntimeConfig::default(),
            ManualClock::default(),
            Lifecycle::new(),
        );
        let s = Arc::clone(&seen);
        runtime.on_exit(move |slots| s.lock().unwrap().extend_from_slice(slots));

        let reg = runtime.registry_mut();
        reg.begin_region(SourceLine(1));
        reg.clock().advance_micros(3_661_000_000);
        reg.end_region(SourceLine(2));
        runtime.finish();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!((seen[0].hours, seen[0].minutes, seen[0].seconds), (1, 1, 1));
    }
}
