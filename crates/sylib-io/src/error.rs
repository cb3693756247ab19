//! I/O error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IoError {
    #[error("Unexpected end of input")]
    Eof,

    #[error("Expected an integer, found byte {0:#04x}")]
    InvalidInteger(u8),

    #[error("Buffer too small: expected {expected}, got {actual}")]
    BufferTooSmall { expected: usize, actual: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type IoResult<T> = Result<T, IoError>;
