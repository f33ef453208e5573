//! EIP76D True Random Number Generator driver.
//!
//! [`Trng`] is the only entry point callers need. It owns the hardware
//! controller and a 16-byte cache behind one spin lock. Each byte handed out
//! takes the lock once: refill if the cache is empty, copy one byte, advance
//! the cursor, release. Concurrent callers therefore interleave at byte
//! granularity and never see a half-refilled cache.

mod config;
mod controller;
mod fifo;
mod regs;

#[cfg(any(test, feature = "test_mocks"))]
pub mod sim;

pub use config::{AlarmThresholds, TrngConfig};
pub use controller::{AlarmState, Eip76d, EipRevision, Poll};
pub use fifo::{Fifo, FIFO_BYTES};
pub use regs::{Mmio, RegisterIo, RNG_FRO_MASK};

/// Register offsets and bit fields
pub mod registers {
    pub use super::regs::*;
}

use spin::Mutex;

use super::IoMapper;
use crate::error::TrngError;

// ═══════════════════════════════════════════════════════════════════════════════
// TRNG DEVICE
// ═══════════════════════════════════════════════════════════════════════════════

struct Inner<R: RegisterIo> {
    hw: Eip76d<R>,
    fifo: Fifo,
}

pub struct Trng<R: RegisterIo> {
    inner: Mutex<Inner<R>>,
}

impl Trng<Mmio> {
    /// Map the register block at `phys` and bring the generator up.
    pub fn probe<M: IoMapper>(
        mapper: &M,
        phys: usize,
        size: usize,
        config: TrngConfig,
    ) -> Result<Self, TrngError> {
        let base = mapper
            .map_io(phys, size)
            .ok_or(TrngError::MapFailed { phys, size })?;

        // The mapper vouched for `size` bytes at `base`
        let regs = unsafe { Mmio::new(base) };
        Ok(Trng::new(regs, config))
    }
}

impl<R: RegisterIo> Trng<R> {
    /// Take ownership of a register block and run the enable sequence.
    pub fn new(regs: R, config: TrngConfig) -> Self {
        let mut hw = Eip76d::new(regs, config);
        hw.initialize();

        let options = hw.options();
        match hw.revision() {
            Some(rev) => log::info!(
                "EIP76D TRNG initialized (EIP-{} v{}.{}.{}, options {:#010x})",
                rev.eip_number,
                rev.major,
                rev.minor,
                rev.patch,
                options
            ),
            None => log::info!("EIP76D TRNG initialized (options {:#010x})", options),
        }

        Trng {
            inner: Mutex::new(Inner {
                hw,
                fifo: Fifo::new(),
            }),
        }
    }

    /// Re-run the enable sequence and drop any cached bytes.
    pub fn initialize(&self) {
        let mut inner = self.inner.lock();
        inner.hw.initialize();
        inner.fifo.invalidate();
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.lock().hw.is_enabled()
    }

    pub fn revision(&self) -> Option<EipRevision> {
        self.inner.lock().hw.revision()
    }

    /// Fill `buf` with raw hardware entropy.
    ///
    /// Cannot fail once the device is mapped. Never returns early: every byte
    /// is written before this returns, which may take unbounded time if the
    /// FRO array keeps alarming. An empty buffer touches neither the lock nor
    /// the hardware.
    pub fn get_random_bytes(&self, buf: &mut [u8]) {
        for out in buf.iter_mut() {
            let mut inner = self.inner.lock();
            let Inner { hw, fifo } = &mut *inner;

            // Refill our FIFO
            if fifo.is_empty() {
                fifo.refill(hw.read_128());
            }

            *out = fifo.take();
        }
    }

    /// `rand_core` adapter over [`get_random_bytes`](Self::get_random_bytes)
    pub fn rng(&self) -> TrngRng<'_, R> {
        TrngRng { trng: self }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// RAND_CORE ADAPTER
// ═══════════════════════════════════════════════════════════════════════════════

/// Borrowing [`rand_core::RngCore`] view of a [`Trng`].
///
/// Deliberately not `CryptoRng`: the bytes are unconditioned FRO output.
pub struct TrngRng<'a, R: RegisterIo> {
    trng: &'a Trng<R>,
}

impl<R: RegisterIo> rand_core::RngCore for TrngRng<'_, R> {
    fn next_u32(&mut self) -> u32 {
        rand_core::impls::next_u32_via_fill(self)
    }

    fn next_u64(&mut self) -> u64 {
        rand_core::impls::next_u64_via_fill(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.trng.get_random_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
