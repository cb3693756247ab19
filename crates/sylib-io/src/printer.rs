//! Output with `printf` conversion semantics

use std::io::Write;

use crate::error::IoResult;

/// Writer for scalar and array output
pub struct Printer<W: Write> {
    writer: W,
}

impl<W: Write> Printer<W> {
    pub fn new(writer: W) -> Self {
        Printer { writer }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// `%d`, no separator
    pub fn put_int(&mut self, value: i32) -> IoResult<()> {
        write!(self.writer, "{}", value)?;
        Ok(())
    }

    /// `%c`: the low byte of `value`
    pub fn put_char(&mut self, value: i32) -> IoResult<()> {
        self.writer.write_all(&[value as u8])?;
        Ok(())
    }

    /// `"{count}:"`, then `" {x}"` per element, then a newline
    ///
    /// `count` is printed as given; a non-positive count comes with no values.
    pub fn put_array(&mut self, count: i32, values: &[i32]) -> IoResult<()> {
        write!(self.writer, "{}:", count)?;
        for value in values {
            write!(self.writer, " {}", value)?;
        }
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    pub fn flush(&mut self) -> IoResult<()> {
        self.writer.flush()?;
        Ok(())
    }
}
