//! sylib FFI - Runtime library for compiled programs
//!
//! C-compatible entry points that generated code links against:
//! - `getint`, `getch`, `getarray`, `putint`, `putch`, `putarray`
//! - `starttime`, `stoptime` and the line-carrying `_sysy_*` forms
//! - `before_main` / `after_main` lifecycle hooks
//! - read-only slot accessors and exit-callback registration

pub mod error;
pub mod io;
pub mod lifecycle;
mod runtime;
pub mod timing;
pub mod types;

use std::ffi::c_char;

pub use error::*;
pub use io::*;
pub use lifecycle::*;
pub use timing::*;
pub use types::*;

/// Library version
#[no_mangle]
pub extern "C" fn sylib_version() -> *const c_char {
    static VERSION: &[u8] = b"0.2.0\0";
    VERSION.as_ptr() as *const c_char
}
