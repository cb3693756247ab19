//! sylib Test Harness - Scripted validation of the runtime
//!
//! This crate provides:
//! - Region simulation over a manual clock
//! - Randomized region scripts with known expected durations
//! - In-memory program I/O sessions

pub mod io_session;
pub mod region_simulator;

pub use io_session::*;
pub use region_simulator::*;
