//! FFI Error handling

use std::ffi::{c_char, c_int, CString};

use sylib_core::SylibError;
use sylib_io::IoError;

/// Error codes for FFI functions
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SylibErrorCode {
    /// Success
    Ok = 0,
    /// Invalid argument
    InvalidArgument = -1,
    /// Input ended early
    EndOfInput = -2,
    /// Input did not hold the expected conversion
    InvalidInput = -3,
    /// Buffer too small
    BufferTooSmall = -4,
    /// Underlying stream failed
    IoFailure = -5,
    /// Slot index out of range
    OutOfRange = -6,
    /// Invalid configuration
    InvalidConfig = -7,
    /// Internal error
    InternalError = -99,
}

impl From<SylibErrorCode> for c_int {
    fn from(code: SylibErrorCode) -> Self {
        code as c_int
    }
}

impl From<&IoError> for SylibErrorCode {
    fn from(err: &IoError) -> Self {
        match err {
            IoError::Eof => SylibErrorCode::EndOfInput,
            IoError::InvalidInteger(_) => SylibErrorCode::InvalidInput,
            IoError::BufferTooSmall { .. } => SylibErrorCode::BufferTooSmall,
            IoError::Io(_) => SylibErrorCode::IoFailure,
        }
    }
}

impl From<&SylibError> for SylibErrorCode {
    fn from(err: &SylibError) -> Self {
        match err {
            SylibError::InvalidConfig { .. } => SylibErrorCode::InvalidConfig,
            SylibError::SlotOutOfRange { .. } => SylibErrorCode::OutOfRange,
            SylibError::Region(_) => SylibErrorCode::InvalidArgument,
        }
    }
}

thread_local! {
    static LAST_ERROR: std::cell::RefCell<Option<CString>> =
        const { std::cell::RefCell::new(None) };
}

/// Set the last error message
pub fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

/// Record an I/O failure as the last error
pub(crate) fn report_io_error(operation: &str, err: &IoError) {
    let code = SylibErrorCode::from(err);
    tracing::debug!(operation, code = code as c_int, error = %err, "runtime I/O failed");
    set_last_error(&format!("{}: {}", operation, err));
}

/// Get the last error message
/// Returns NULL if no error
#[no_mangle]
pub extern "C" fn sylib_get_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match e.borrow().as_ref() {
        Some(s) => s.as_ptr(),
        None => std::ptr::null(),
    })
}

/// Clear the last error
#[no_mangle]
pub extern "C" fn sylib_clear_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Result type for FFI functions
pub type SylibFfiResult<T> = Result<T, SylibErrorCode>;

/// Convert a SylibFfiResult to a C int
pub fn result_to_int<T>(result: SylibFfiResult<T>) -> c_int {
    match result {
        Ok(_) => 0,
        Err(code) => code as c_int,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CStr;

    #[test]
    fn test_last_error_roundtrip() {
        sylib_clear_error();
        assert!(sylib_get_last_error().is_null());

        let err = IoError::InvalidInteger(b'q');
        assert_eq!(SylibErrorCode::from(&err), SylibErrorCode::InvalidInput);
        report_io_error("getint", &err);

        let msg = unsafe { CStr::from_ptr(sylib_get_last_error()) };
        assert_eq!(
            msg.to_str().unwrap(),
            "getint: Expected an integer, found byte 0x71"
        );

        sylib_clear_error();
        assert!(sylib_get_last_error().is_null());
    }

    #[test]
    fn test_result_to_int() {
        assert_eq!(result_to_int::<()>(Ok(())), 0);
        assert_eq!(result_to_int::<()>(Err(SylibErrorCode::OutOfRange)), -6);
    }
}
