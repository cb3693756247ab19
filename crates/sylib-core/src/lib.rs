//! sylib Core - Region timing and runtime lifecycle
//!
//! This crate defines the state behind the runtime library that compiled
//! programs link against:
//! - Wall-clock primitives (WallTime, WallClock)
//! - Timing slots with carry-normalized durations
//! - The timing registry (begin/end region, cursor, diagnostics)
//! - Lifecycle hooks bracketing program execution
//! - Runtime configuration

pub mod clock;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod registry;
pub mod slot;
pub mod time;

pub use clock::*;
pub use config::*;
pub use error::*;
pub use lifecycle::*;
pub use registry::*;
pub use slot::*;
pub use time::*;
