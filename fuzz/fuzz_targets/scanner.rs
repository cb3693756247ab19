#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use sylib_io::{IoError, Scanner};

fuzz_target!(|data: &[u8]| {
    let mut scanner = Scanner::new(Cursor::new(data));
    let mut buf = [0i32; 64];

    // Every call must return; the scanner never panics on arbitrary bytes
    loop {
        match scanner.read_array(&mut buf) {
            Ok(_) | Err(IoError::BufferTooSmall { .. }) => continue,
            Err(IoError::InvalidInteger(_)) => {
                if scanner.read_char().is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    }
});
