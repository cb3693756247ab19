//! Input scanning with `scanf` conversion semantics

use std::io::{BufRead, ErrorKind};

use crate::error::{IoError, IoResult};

/// `isspace` in the C locale
#[inline]
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

/// Byte-level reader over any buffered input
pub struct Scanner<R> {
    reader: R,
}

impl<R: BufRead> Scanner<R> {
    pub fn new(reader: R) -> Self {
        Scanner { reader }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn peek(&mut self) -> IoResult<Option<u8>> {
        loop {
            match self.reader.fill_buf() {
                Ok(buf) => return Ok(buf.first().copied()),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn bump(&mut self) {
        self.reader.consume(1);
    }

    fn skip_space(&mut self) -> IoResult<()> {
        while let Some(b) = self.peek()? {
            if !is_space(b) {
                break;
            }
            self.bump();
        }
        Ok(())
    }

    /// Read one `%d` integer
    ///
    /// Leading whitespace is skipped and the first byte after the digits is
    /// left unread. Values outside `i32` wrap.
    pub fn read_int(&mut self) -> IoResult<i32> {
        self.skip_space()?;

        let negative = match self.peek()? {
            Some(b'-') => {
                self.bump();
                true
            }
            Some(b'+') => {
                self.bump();
                false
            }
            _ => false,
        };

        let mut value: i32 = 0;
        let mut digits = 0usize;
        loop {
            match self.peek()? {
                Some(b) if b.is_ascii_digit() => {
                    value = value.wrapping_mul(10).wrapping_add(i32::from(b - b'0'));
                    digits += 1;
                    self.bump();
                }
                Some(b) if digits == 0 => return Err(IoError::InvalidInteger(b)),
                None if digits == 0 => return Err(IoError::Eof),
                _ => break,
            }
        }

        Ok(if negative { value.wrapping_neg() } else { value })
    }

    /// Read one `%c` character: the next raw byte, whitespace included
    pub fn read_char(&mut self) -> IoResult<u8> {
        match self.peek()? {
            Some(b) => {
                self.bump();
                Ok(b)
            }
            None => Err(IoError::Eof),
        }
    }

    /// Fill `out` with consecutive integers
    pub fn read_ints(&mut self, out: &mut [i32]) -> IoResult<()> {
        for slot in out.iter_mut() {
            *slot = self.read_int()?;
        }
        Ok(())
    }

    /// Read a count followed by that many integers; returns the count
    ///
    /// A count of zero or less reads nothing further.
    pub fn read_array(&mut self, out: &mut [i32]) -> IoResult<i32> {
        let n = self.read_int()?;
        if n > 0 {
            let len = n as usize;
            if len > out.len() {
                return Err(IoError::BufferTooSmall {
                    expected: len,
                    actual: out.len(),
                });
            }
            self.read_ints(&mut out[..len])?;
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn scanner(input: &str) -> Scanner<Cursor<Vec<u8>>> {
        Scanner::new(Cursor::new(input.as_bytes().to_vec()))
    }

    #[test]
    fn test_read_ints_with_whitespace() {
        let mut s = scanner("  42\n-7\t+13\x0b\x0c 0");

        assert_eq!(s.read_int().unwrap(), 42);
        assert_eq!(s.read_int().unwrap(), -7);
        assert_eq!(s.read_int().unwrap(), 13);
        assert_eq!(s.read_int().unwrap(), 0);
        assert!(matches!(s.read_int(), Err(IoError::Eof)));
    }

    #[test]
    fn test_int_stops_before_non_digit() {
        let mut s = scanner("12ab");

        assert_eq!(s.read_int().unwrap(), 12);
        assert_eq!(s.read_char().unwrap(), b'a');
    }

    #[test]
    fn test_invalid_integer_left_unread() {
        let mut s = scanner(" x1");

        assert!(matches!(s.read_int(), Err(IoError::InvalidInteger(b'x'))));
        assert_eq!(s.read_char().unwrap(), b'x');
        assert_eq!(s.read_int().unwrap(), 1);
    }

    #[test]
    fn test_int_extremes() {
        let mut s = scanner("-2147483648 2147483647 2147483648");

        assert_eq!(s.read_int().unwrap(), i32::MIN);
        assert_eq!(s.read_int().unwrap(), i32::MAX);
        assert_eq!(s.read_int().unwrap(), i32::MIN);
    }

    #[test]
    fn test_read_char_keeps_whitespace() {
        let mut s = scanner("5\nz");

        assert_eq!(s.read_int().unwrap(), 5);
        assert_eq!(s.read_char().unwrap(), b'\n');
        assert_eq!(s.read_char().unwrap(), b'z');
        assert!(matches!(s.read_char(), Err(IoError::Eof)));
    }

    #[test]
    fn test_read_array() {
        let mut s = scanner("3\n10 -20 30\n");
        let mut buf = [0i32; 4];

        assert_eq!(s.read_array(&mut buf).unwrap(), 3);
        assert_eq!(buf, [10, -20, 30, 0]);
    }

    #[test]
    fn test_read_array_non_positive_count() {
        let mut s = scanner("-2 9");
        let mut buf = [0i32; 1];

        assert_eq!(s.read_array(&mut buf).unwrap(), -2);
        assert_eq!(s.read_int().unwrap(), 9);
    }

    #[test]
    fn test_read_array_buffer_too_small() {
        let mut s = scanner("5 1 2 3 4 5");
        let mut buf = [0i32; 2];

        assert!(matches!(
            s.read_array(&mut buf),
            Err(IoError::BufferTooSmall {
                expected: 5,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_read_array_truncated_input() {
        let mut s = scanner("3 1 2");
        let mut buf = [0i32; 3];

        assert!(matches!(s.read_array(&mut buf), Err(IoError::Eof)));
        assert_eq!(&buf[..2], &[1, 2]);
    }
}
