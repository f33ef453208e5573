//! EIP76D register map and the register access seam.

use crate::arch;

// ═══════════════════════════════════════════════════════════════════════════════
// EIP76D REGISTERS
// ═══════════════════════════════════════════════════════════════════════════════

pub const RNG_OUTPUT_0: usize = 0x00;
pub const RNG_OUTPUT_1: usize = 0x04;
pub const RNG_OUTPUT_2: usize = 0x08;
pub const RNG_OUTPUT_3: usize = 0x0C;
pub const RNG_STATUS: usize = 0x10;
pub const RNG_INTACK: usize = 0x10;
pub const RNG_CONTROL: usize = 0x14;
pub const RNG_CONFIG: usize = 0x18;
pub const RNG_ALARMCNT: usize = 0x1C;
pub const RNG_FROENABLE: usize = 0x20;
pub const RNG_FRODETUNE: usize = 0x24;
pub const RNG_ALARMMASK: usize = 0x28;
pub const RNG_ALARMSTOP: usize = 0x2C;
pub const RNG_OPTIONS: usize = 0x78;
pub const RNG_EIP_REV: usize = 0x7C;

pub const RNG_OUTPUTS: [usize; 4] = [RNG_OUTPUT_0, RNG_OUTPUT_1, RNG_OUTPUT_2, RNG_OUTPUT_3];

// Status / IntAck bits
pub const RNG_READY: u32 = 1 << 0;
pub const SHUTDOWN_OFLO: u32 = 1 << 1;

// Control Register bits
pub const ENABLE_TRNG: u32 = 1 << 10;
pub const RNG_CONTROL_STARTUP_CYCLES_SHIFT: u32 = 16;
pub const RNG_CONTROL_STARTUP_CYCLES_MASK: u32 = 0xFFFF << 16;

// Config Register fields
pub const RNG_CONFIG_MIN_REFIL_CYCLES_SHIFT: u32 = 0;
pub const RNG_CONFIG_MIN_REFIL_CYCLES_MASK: u32 = 0xFF;
pub const RNG_CONFIG_MAX_REFIL_CYCLES_SHIFT: u32 = 16;
pub const RNG_CONFIG_MAX_REFIL_CYCLES_MASK: u32 = 0xFFFF << 16;

// Alarm Count Register fields
pub const RNG_ALARMCNT_ALARM_TH_SHIFT: u32 = 0;
pub const RNG_ALARMCNT_ALARM_TH_MASK: u32 = 0xFF;
pub const RNG_ALARMCNT_SHUTDOWN_TH_SHIFT: u32 = 16;
pub const RNG_ALARMCNT_SHUTDOWN_TH_MASK: u32 = 0x1F << 16;

/// All 24 FROs
pub const RNG_FRO_MASK: u32 = 0x00FF_FFFF;

// ═══════════════════════════════════════════════════════════════════════════════
// REGISTER ACCESS
// ═══════════════════════════════════════════════════════════════════════════════

/// Atomic 32-bit access to one register block, addressed by offset.
///
/// Implementations must not cache or reorder accesses across calls.
pub trait RegisterIo {
    fn read32(&self, offset: usize) -> u32;
    fn write32(&self, offset: usize, value: u32);
}

impl<T: RegisterIo + ?Sized> RegisterIo for &T {
    #[inline]
    fn read32(&self, offset: usize) -> u32 {
        (**self).read32(offset)
    }

    #[inline]
    fn write32(&self, offset: usize, value: u32) {
        (**self).write32(offset, value)
    }
}

/// A memory-mapped EIP76D register block
#[derive(Debug, Clone, Copy)]
pub struct Mmio {
    base: usize,
}

impl Mmio {
    /// Wrap a mapped register block.
    ///
    /// # Safety
    /// `base` must be the virtual address of an EIP76D register block that
    /// stays mapped for the lifetime of the returned value.
    pub const unsafe fn new(base: usize) -> Self {
        Mmio { base }
    }
}

impl RegisterIo for Mmio {
    #[inline]
    fn read32(&self, offset: usize) -> u32 {
        unsafe { arch::read32(self.base + offset) }
    }

    #[inline]
    fn write32(&self, offset: usize, value: u32) {
        unsafe { arch::write32(self.base + offset, value) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_masks_do_not_overlap() {
        assert_eq!(RNG_CONFIG_MIN_REFIL_CYCLES_MASK & RNG_CONFIG_MAX_REFIL_CYCLES_MASK, 0);
        assert_eq!(RNG_ALARMCNT_ALARM_TH_MASK & RNG_ALARMCNT_SHUTDOWN_TH_MASK, 0);
        assert_eq!(ENABLE_TRNG & RNG_CONTROL_STARTUP_CYCLES_MASK, 0);
        assert_eq!(RNG_READY & SHUTDOWN_OFLO, 0);
    }

    #[test]
    fn test_mmio_offsets() {
        let mut block = [0u32; RNG_EIP_REV / 4 + 1];
        let regs = unsafe { Mmio::new(block.as_mut_ptr() as usize) };

        regs.write32(RNG_FRODETUNE, 0x0000_0005);
        regs.write32(RNG_EIP_REV, 0x0204_B34C);

        assert_eq!(regs.read32(RNG_FRODETUNE), 5);
        assert_eq!(block[RNG_FRODETUNE / 4], 5);
        assert_eq!(block[RNG_EIP_REV / 4], 0x0204_B34C);
    }
}
