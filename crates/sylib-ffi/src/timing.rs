#![allow(clippy::missing_safety_doc)]
//! FFI region timing
//!
//! Generated code calls `starttime()` / `stoptime()`; the line-carrying
//! `_sysy_*` forms are the underlying entry points.

use std::ffi::c_int;

use sylib_core::SourceLine;

use crate::error::*;
use crate::types::*;

/// Begin a timed region at `lineno`
#[no_mangle]
pub extern "C" fn _sysy_starttime(lineno: c_int) {
    crate::runtime::with_runtime(|runtime| {
        runtime.registry_mut().begin_region(SourceLine::new(lineno));
    });
}

/// End the open region at `lineno` and advance to the next slot
#[no_mangle]
pub extern "C" fn _sysy_stoptime(lineno: c_int) {
    crate::runtime::with_runtime(|runtime| {
        runtime.registry_mut().end_region(SourceLine::new(lineno));
    });
}

/// Begin a timed region; the recorded line is this call site in the runtime
#[no_mangle]
pub extern "C" fn starttime() {
    _sysy_starttime(line!() as c_int);
}

/// End a timed region; the recorded line is this call site in the runtime
#[no_mangle]
pub extern "C" fn stoptime() {
    _sysy_stoptime(line!() as c_int);
}

/// Number of completed slots
#[no_mangle]
pub extern "C" fn sylib_timing_slot_count() -> usize {
    crate::runtime::with_runtime(|runtime| runtime.registry().len()).unwrap_or(0)
}

/// Index the next begin/end pair will fill
#[no_mangle]
pub extern "C" fn sylib_timing_cursor() -> usize {
    crate::runtime::with_runtime(|runtime| runtime.registry().cursor()).unwrap_or(0)
}

/// Number of alternation violations recorded under checked discipline
#[no_mangle]
pub extern "C" fn sylib_timing_violation_count() -> usize {
    crate::runtime::with_runtime(|runtime| runtime.registry().violations().len()).unwrap_or(0)
}

/// Copy slot `index` into `out`
/// Returns 0 on success, negative on error
#[no_mangle]
pub unsafe extern "C" fn sylib_timing_slot(index: usize, out: *mut SylibTimingSlot) -> c_int {
    if out.is_null() {
        set_last_error("Null pointer");
        return SylibErrorCode::InvalidArgument as c_int;
    }

    let slot = crate::runtime::with_runtime(|runtime| {
        runtime
            .registry()
            .slot(index)
            .map(SylibTimingSlot::from)
            .map_err(|e| {
                set_last_error(&e.to_string());
                SylibErrorCode::from(&e)
            })
    })
    .unwrap_or_else(|| {
        set_last_error("Runtime is shutting down");
        Err(SylibErrorCode::InternalError)
    });

    result_to_int(slot.map(|slot| out.write(slot)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::time::Duration;

    #[test]
    #[serial]
    fn test_region_fills_next_slot() {
        let before = sylib_timing_slot_count();
        assert_eq!(sylib_timing_cursor(), before);

        _sysy_starttime(12);
        std::thread::sleep(Duration::from_millis(5));
        _sysy_stoptime(34);

        assert_eq!(sylib_timing_slot_count(), before + 1);
        assert_eq!(sylib_timing_cursor(), before + 1);

        let mut slot = SylibTimingSlot::default();
        let rc = unsafe { sylib_timing_slot(before, &mut slot) };
        assert_eq!(rc, 0);
        assert_eq!((slot.start_line, slot.stop_line), (12, 34));
        assert!(slot.microseconds >= 5_000 || slot.seconds > 0);
        assert!(slot.microseconds < 1_000_000);
        assert!(slot.seconds < 60 && slot.minutes < 60);
    }

    #[test]
    #[serial]
    fn test_starttime_stoptime_record_runtime_lines() {
        let before = sylib_timing_slot_count();
        starttime();
        stoptime();

        let mut slot = SylibTimingSlot::default();
        assert_eq!(unsafe { sylib_timing_slot(before, &mut slot) }, 0);
        assert!(slot.start_line > 0);
        assert!(slot.stop_line > slot.start_line);
    }

    #[test]
    #[serial]
    fn test_slot_accessor_errors() {
        let count = sylib_timing_slot_count();
        let mut slot = SylibTimingSlot::default();

        let rc = unsafe { sylib_timing_slot(count + 10, &mut slot) };
        assert_eq!(rc, SylibErrorCode::OutOfRange as c_int);
        assert!(!sylib_get_last_error().is_null());

        let rc = unsafe { sylib_timing_slot(0, std::ptr::null_mut()) };
        assert_eq!(rc, SylibErrorCode::InvalidArgument as c_int);
    }
}
