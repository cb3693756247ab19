//! FFI Types - C-compatible type definitions

use std::ffi::{c_int, c_void};

use sylib_core::TimingSlot;

/// Timing slot as seen from C
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SylibTimingSlot {
    pub start_line: c_int,
    pub stop_line: c_int,
    pub microseconds: u64,
    pub seconds: u64,
    pub minutes: u64,
    pub hours: u64,
}

impl From<&TimingSlot> for SylibTimingSlot {
    fn from(slot: &TimingSlot) -> Self {
        Self {
            start_line: slot.start_line.get(),
            stop_line: slot.stop_line.get(),
            microseconds: slot.microseconds,
            seconds: slot.seconds,
            minutes: slot.minutes,
            hours: slot.hours,
        }
    }
}

/// Callback invoked once at program exit with every recorded slot
pub type SylibExitCallback =
    extern "C" fn(user_data: *mut c_void, slots: *const SylibTimingSlot, len: usize);

/// Caller-owned pointer carried into an exit hook
pub(crate) struct UserData(pub(crate) *mut c_void);

impl UserData {
    pub(crate) fn get(&self) -> *mut c_void {
        self.0
    }
}

// The pointer is only handed back to the caller's own callback
unsafe impl Send for UserData {}
