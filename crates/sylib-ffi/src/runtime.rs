//! Process-wide runtime instance
//!
//! Exactly one `Runtime` exists per process. It is built by `before_main`
//! or, if the platform never ran the constructor, by the first entry point
//! that needs it. The mutex makes the static sound; instrumented programs
//! are still expected to call in from a single thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

use parking_lot::Mutex;
use sylib_core::{Lifecycle, Runtime, RuntimeConfig, SystemWallClock};
use tracing_subscriber::EnvFilter;

use crate::error::set_last_error;

pub(crate) type ProcessRuntime = Runtime<SystemWallClock>;

static RUNTIME: Mutex<Option<ProcessRuntime>> = parking_lot::const_mutex(None);
static STARTED: Once = Once::new();
static FINISHED: AtomicBool = AtomicBool::new(false);

/// Build the runtime and arrange teardown, once per process
pub(crate) fn ensure_started() {
    STARTED.call_once(|| {
        let config = load_config();
        init_logging(config.log_filter.as_deref());

        let runtime = Runtime::start(config, SystemWallClock::new(), Lifecycle::new());
        *RUNTIME.lock() = Some(runtime);

        // SAFETY: after_main is a plain extern "C" fn with no captured state
        if unsafe { libc::atexit(crate::lifecycle::after_main) } != 0 {
            tracing::warn!("atexit registration failed; exit hooks will not run");
        }
    });
}

fn load_config() -> RuntimeConfig {
    match RuntimeConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            set_last_error(&e.to_string());
            RuntimeConfig::default()
        }
    }
}

fn init_logging(filter: Option<&str>) {
    let Some(filter) = filter else {
        return;
    };

    match EnvFilter::try_new(filter) {
        Ok(filter) => {
            // Another subscriber may already be installed by a host program
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init();
        }
        Err(e) => set_last_error(&format!("Invalid log filter {:?}: {}", filter, e)),
    }
}

/// Run `f` against the process runtime, starting it if needed
///
/// Returns `None` while teardown is running exit hooks.
pub(crate) fn with_runtime<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut ProcessRuntime) -> R,
{
    ensure_started();
    RUNTIME.lock().as_mut().map(f)
}

/// Run exit hooks once; the runtime stays readable afterwards
pub(crate) fn finish() {
    if FINISHED.swap(true, Ordering::SeqCst) {
        return;
    }

    // Hooks run unlocked so C callbacks may call back into the library
    let taken = RUNTIME.lock().take();
    if let Some(mut runtime) = taken {
        runtime.finish();
        *RUNTIME.lock() = Some(runtime);
    }
}

pub(crate) fn is_finished() -> bool {
    FINISHED.load(Ordering::SeqCst)
}
