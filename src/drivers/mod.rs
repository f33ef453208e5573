//! Hardware drivers for TI K3 secure-world peripherals

pub mod eip76d;

// Re-export commonly used items
pub use eip76d::Trng;

// ═══════════════════════════════════════════════════════════════════════════════
// K3 MEMORY MAP
// ═══════════════════════════════════════════════════════════════════════════════

/// SA2UL security accelerator block
pub const SA2UL_BASE: usize = 0x4090_0000;

/// TRNG offset inside SA2UL
pub const RNG_OFFSET: usize = 0x0001_0000;

/// Physical base of the EIP76D register block
pub const RNG_BASE: usize = SA2UL_BASE + RNG_OFFSET;

/// Size of the EIP76D register block (through EIP_REV at 0x7C)
pub const RNG_REG_SIZE: usize = 0x80;

// ═══════════════════════════════════════════════════════════════════════════════
// ADDRESS MAPPING
// ═══════════════════════════════════════════════════════════════════════════════

/// Physical to virtual translation for device memory, supplied by the platform.
pub trait IoMapper {
    /// Map `size` bytes of secure device memory at `phys`.
    ///
    /// Returns the virtual base, or `None` if the region is not registered.
    fn map_io(&self, phys: usize, size: usize) -> Option<usize>;
}

/// Mapper for identity-mapped address spaces (early boot, bare metal)
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityMap;

impl IoMapper for IdentityMap {
    fn map_io(&self, phys: usize, size: usize) -> Option<usize> {
        // Reject a region that would wrap the address space
        phys.checked_add(size).map(|_| phys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_base_inside_sa2ul() {
        assert_eq!(RNG_BASE, 0x4091_0000);
        assert!(RNG_REG_SIZE >= 0x80);
    }

    #[test]
    fn test_identity_map() {
        assert_eq!(IdentityMap.map_io(RNG_BASE, RNG_REG_SIZE), Some(RNG_BASE));
        assert_eq!(IdentityMap.map_io(usize::MAX, 0x10), None);
    }
}
