//! Driver error type.
//!
//! Oscillator faults are healed inside the read protocol and never show up
//! here. The only failure a caller can observe is at bring-up, when the
//! register block cannot be mapped.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrngError {
    /// The platform mapper could not provide a virtual address for the
    /// register block.
    MapFailed { phys: usize, size: usize },
}

impl fmt::Display for TrngError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrngError::MapFailed { phys, size } => {
                write!(f, "failed to map TRNG registers at {:#x} (+{:#x})", phys, size)
            }
        }
    }
}
