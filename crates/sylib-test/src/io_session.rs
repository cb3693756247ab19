//! In-memory program I/O sessions
//!
//! Runs a program body against a fixed stdin and captures stdout, the way
//! compiled test fixtures are checked against expected output.

use std::io::Cursor;

use sylib_io::{IoResult, Printer, Scanner};

pub type SessionScanner = Scanner<Cursor<Vec<u8>>>;
pub type SessionPrinter = Printer<Vec<u8>>;

/// Captured output of one session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionOutput {
    pub stdout: String,
}

/// Run `program` with `input` as stdin
pub fn run_session<F>(input: &str, program: F) -> IoResult<SessionOutput>
where
    F: FnOnce(&mut SessionScanner, &mut SessionPrinter) -> IoResult<()>,
{
    let mut scanner = Scanner::new(Cursor::new(input.as_bytes().to_vec()));
    let mut printer = Printer::new(Vec::new());

    program(&mut scanner, &mut printer)?;
    printer.flush()?;

    Ok(SessionOutput {
        stdout: String::from_utf8_lossy(&printer.into_inner()).into_owned(),
    })
}

/// Read an array and print it back reversed
pub fn reverse_array_program(
    scanner: &mut SessionScanner,
    printer: &mut SessionPrinter,
) -> IoResult<()> {
    let mut buf = [0i32; 256];
    let n = scanner.read_array(&mut buf)?;
    let len = n.max(0) as usize;
    buf[..len].reverse();
    printer.put_array(n, &buf[..len])
}

#[cfg(test)]
mod tests {
    use super::*;
    use sylib_io::IoError;

    #[test]
    fn test_reverse_array_session() {
        let out = run_session("4\n1 2 3 4\n", reverse_array_program).unwrap();
        assert_eq!(out.stdout, "4: 4 3 2 1\n");
    }

    #[test]
    fn test_echo_chars_until_eof() {
        let out = run_session("ab\n", |scanner, printer| loop {
            match scanner.read_char() {
                Ok(c) => printer.put_char(i32::from(c))?,
                Err(IoError::Eof) => return Ok(()),
                Err(e) => return Err(e),
            }
        })
        .unwrap();

        assert_eq!(out.stdout, "ab\n");
    }

    #[test]
    fn test_sum_program() {
        let out = run_session("3 -4 10", |scanner, printer| {
            let mut total = 0;
            for _ in 0..3 {
                total += scanner.read_int()?;
            }
            printer.put_int(total)?;
            printer.put_char(10)
        })
        .unwrap();

        assert_eq!(out.stdout, "9\n");
    }

    #[test]
    fn test_session_propagates_input_errors() {
        let err = run_session("", reverse_array_program).unwrap_err();
        assert!(matches!(err, IoError::Eof));
    }
}
