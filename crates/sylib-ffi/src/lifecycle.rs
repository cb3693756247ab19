//! FFI lifecycle hooks
//!
//! `before_main` runs as a process constructor; `after_main` runs through
//! `atexit`. Neither produces output of its own: teardown runs registered
//! exit callbacks and flushes buffered standard output.

use std::ffi::{c_int, c_void};

use crate::error::*;
use crate::types::*;

/// Process-start hook
#[no_mangle]
pub extern "C" fn before_main() {
    crate::runtime::ensure_started();
    tracing::debug!("before_main");
}

/// Process-end hook; safe to call more than once
#[no_mangle]
pub extern "C" fn after_main() {
    if !crate::runtime::is_finished() {
        tracing::debug!("after_main");
    }
    crate::runtime::finish();
    crate::io::flush_stdout();
}

#[cfg(any(target_os = "linux", target_os = "android", target_os = "freebsd"))]
#[used]
#[link_section = ".init_array"]
static BEFORE_MAIN: extern "C" fn() = before_main;

#[cfg(target_vendor = "apple")]
#[used]
#[link_section = "__DATA,__mod_init_func"]
static BEFORE_MAIN: extern "C" fn() = before_main;

/// Register a callback run once at exit with all recorded slots
/// Returns 0 on success, negative on error
#[no_mangle]
pub extern "C" fn sylib_on_exit(
    callback: Option<SylibExitCallback>,
    user_data: *mut c_void,
) -> c_int {
    let Some(callback) = callback else {
        set_last_error("Null callback");
        return SylibErrorCode::InvalidArgument as c_int;
    };

    let user_data = UserData(user_data);
    let registered = crate::runtime::with_runtime(move |runtime| {
        runtime.on_exit(move |slots| {
            let exported: Vec<SylibTimingSlot> = slots.iter().map(SylibTimingSlot::from).collect();
            callback(user_data.get(), exported.as_ptr(), exported.len());
        });
    });

    result_to_int(registered.ok_or_else(|| {
        set_last_error("Runtime is shutting down");
        SylibErrorCode::InternalError
    }))
}
