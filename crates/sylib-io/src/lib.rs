//! sylib I/O - Scalar and array primitives over standard streams
//!
//! Mirrors the `scanf`/`printf` conversions compiled programs expect:
//! - `%d` integers and `%c` characters on input
//! - counted integer arrays on both sides

pub mod error;
pub mod printer;
pub mod scanner;

pub use error::*;
pub use printer::*;
pub use scanner::*;
