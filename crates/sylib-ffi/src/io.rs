#![allow(clippy::missing_safety_doc)]
//! FFI standard I/O primitives
//!
//! Failures never abort the program: the function returns its fallback
//! value and the message is kept for `sylib_get_last_error`.

use std::ffi::c_int;
use std::io::{BufRead, BufWriter, StdinLock, Stdout};

use parking_lot::Mutex;
use sylib_io::{IoResult, Printer, Scanner};

use crate::error::*;

/// Buffered stdout, flushed by `after_main`
static STDOUT: Mutex<Option<Printer<BufWriter<Stdout>>>> = parking_lot::const_mutex(None);

fn with_stdin<F, R>(f: F) -> R
where
    F: FnOnce(&mut Scanner<StdinLock<'static>>) -> R,
{
    crate::runtime::ensure_started();
    let mut scanner = Scanner::new(std::io::stdin().lock());
    f(&mut scanner)
}

fn with_stdout<F>(operation: &str, f: F)
where
    F: FnOnce(&mut Printer<BufWriter<Stdout>>) -> IoResult<()>,
{
    crate::runtime::ensure_started();
    let mut guard = STDOUT.lock();
    let printer = guard.get_or_insert_with(|| Printer::new(BufWriter::new(std::io::stdout())));
    if let Err(e) = f(printer) {
        report_io_error(operation, &e);
    }
}

pub(crate) fn flush_stdout() {
    if let Some(printer) = STDOUT.lock().as_mut() {
        if let Err(e) = printer.flush() {
            report_io_error("flush", &e);
        }
    }
}

fn getint_from<R: BufRead>(scanner: &mut Scanner<R>) -> c_int {
    scanner.read_int().unwrap_or_else(|e| {
        report_io_error("getint", &e);
        0
    })
}

fn getch_from<R: BufRead>(scanner: &mut Scanner<R>) -> c_int {
    match scanner.read_char() {
        // Sign-extended like a C `char`
        Ok(byte) => c_int::from(byte as i8),
        Err(e) => {
            report_io_error("getch", &e);
            -1
        }
    }
}

/// # Safety
/// A non-null `a` must hold at least as many elements as the count read.
unsafe fn getarray_from<R: BufRead>(scanner: &mut Scanner<R>, a: *mut c_int) -> c_int {
    let n = match scanner.read_int() {
        Ok(n) => n,
        Err(e) => {
            report_io_error("getarray", &e);
            return 0;
        }
    };

    if n > 0 && !a.is_null() {
        // SAFETY: caller guarantees `a` holds at least `n` elements
        let out = std::slice::from_raw_parts_mut(a, n as usize);
        if let Err(e) = scanner.read_ints(out) {
            report_io_error("getarray", &e);
        }
    } else if n > 0 {
        set_last_error("getarray: Null pointer");
    }
    n
}

/// Read a decimal integer; 0 on failure
#[no_mangle]
pub extern "C" fn getint() -> c_int {
    with_stdin(getint_from)
}

/// Read one character; -1 at end of input
#[no_mangle]
pub extern "C" fn getch() -> c_int {
    with_stdin(getch_from)
}

/// Read a count, then that many integers into `a`; returns the count
///
/// `a` must have room for the count read. A non-positive count reads
/// nothing more.
#[no_mangle]
pub unsafe extern "C" fn getarray(a: *mut c_int) -> c_int {
    with_stdin(|scanner| getarray_from(scanner, a))
}

/// Write a decimal integer with no separator
#[no_mangle]
pub extern "C" fn putint(a: c_int) {
    with_stdout("putint", |printer| printer.put_int(a));
}

/// Write the low byte of `a`
#[no_mangle]
pub extern "C" fn putch(a: c_int) {
    with_stdout("putch", |printer| printer.put_char(a));
}

/// Write `"n: a[0] a[1] ...\n"`
#[no_mangle]
pub unsafe extern "C" fn putarray(n: c_int, a: *const c_int) {
    let values: &[c_int] = if n > 0 && !a.is_null() {
        // SAFETY: caller guarantees `a` holds at least `n` elements
        std::slice::from_raw_parts(a, n as usize)
    } else {
        if n > 0 {
            set_last_error("putarray: Null pointer");
        }
        &[]
    };

    with_stdout("putarray", |printer| printer.put_array(n, values));
}
