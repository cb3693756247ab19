//! Error types for the sylib runtime

use thiserror::Error;

use crate::time::SourceLine;

/// Core sylib errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SylibError {
    #[error("Invalid configuration: {key}={value:?}")]
    InvalidConfig { key: &'static str, value: String },

    #[error("Slot index out of range: {index} (recorded {len})")]
    SlotOutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Region(#[from] RegionViolation),
}

/// Broken begin/end alternation, reported only under checked discipline
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionViolation {
    #[error("Region end at {stop} without a matching begin (slot {slot})")]
    EndWithoutBegin { slot: usize, stop: SourceLine },

    #[error("Region begin at {start} while region from {open} is still open (slot {slot})")]
    NestedBegin {
        slot: usize,
        open: SourceLine,
        start: SourceLine,
    },
}

impl RegionViolation {
    /// Slot index the violation was observed at
    pub fn slot(&self) -> usize {
        match self {
            RegionViolation::EndWithoutBegin { slot, .. } => *slot,
            RegionViolation::NestedBegin { slot, .. } => *slot,
        }
    }
}

/// Result type for sylib operations
pub type SylibResult<T> = Result<T, SylibError>;
