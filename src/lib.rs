//! ╔═══════════════════════════════════════════════════════════════════════════╗
//! ║                     EIP76D TRNG - LIBRARY ROOT                            ║
//! ║              Ring Oscillators In, Random Bytes Out                        ║
//! ╚═══════════════════════════════════════════════════════════════════════════╝
//!
//! Driver for the EIP76D true random number generator found on TI K3 SoCs.
//!
//! The hardware produces one 128-bit word at a time from an array of
//! free-running oscillators (FROs). This crate:
//!
//! - brings the FRO array into a known running configuration,
//! - reads 128-bit words, healing FRO shutdowns caused by statistical
//!   alarms without surfacing them to callers,
//! - serves byte-granular requests from a lock-protected 16-byte cache.
//!
//! Output is raw, unconditioned entropy. Whitening and health testing are the
//! caller's responsibility.
//!
//! Diagnostics go through the [`log`] facade; the embedding runtime installs
//! the logger.

#![no_std]

#[cfg(test)]
extern crate std;

// ═══════════════════════════════════════════════════════════════════════════════
// PUBLIC MODULES
// ═══════════════════════════════════════════════════════════════════════════════

pub mod arch;
pub mod drivers;
pub mod error;

#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use drivers::eip76d::{
    AlarmState, AlarmThresholds, Eip76d, EipRevision, Mmio, Poll, RegisterIo, Trng, TrngConfig,
    TrngRng,
};
pub use drivers::{IdentityMap, IoMapper};
pub use error::TrngError;
