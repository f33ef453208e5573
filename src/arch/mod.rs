//! Architecture-level primitives used by the driver.
//!
//! Only what the TRNG needs survives here: volatile 32-bit register access and
//! the busy-wait hint used between status polls.

// ═══════════════════════════════════════════════════════════════════════════════
// REGISTER ACCESS
// ═══════════════════════════════════════════════════════════════════════════════

/// Read a 32-bit value from a memory-mapped register
///
/// # Safety
/// `addr` must be a mapped, 4-byte aligned device register.
#[inline]
pub unsafe fn read32(addr: usize) -> u32 {
    core::ptr::read_volatile(addr as *const u32)
}

/// Write a 32-bit value to a memory-mapped register
///
/// # Safety
/// `addr` must be a mapped, 4-byte aligned device register.
#[inline]
pub unsafe fn write32(addr: usize, value: u32) {
    core::ptr::write_volatile(addr as *mut u32, value);
}

// ═══════════════════════════════════════════════════════════════════════════════
// DELAY
// ═══════════════════════════════════════════════════════════════════════════════

/// One iteration of a busy-wait loop
#[inline(always)]
pub fn spin_wait() {
    core::hint::spin_loop();
}
