//! Register Access Layer
//!
//! [`RegisterIo`] is the single seam through which the driver touches the
//! peripheral. [`MmioRegisters`] is the production backend: a base address
//! plus volatile 32-bit loads and stores. Host tests substitute an in-memory
//! register file.
//!
//! Offsets passed to a `RegisterIo` are byte offsets from the peripheral base.
//! An out-of-range offset is a programming error, not a runtime fault, so no
//! method here returns a `Result`.

use crate::driver::error::{ConfigError, ConfigResult};
use crate::internal::constants::{DEFAULT_BASE_ADDR, REGISTER_ALIGN};
use crate::internal::register::{read_reg, write_reg};

// =============================================================================
// RegisterIo Trait
// =============================================================================

/// Raw 32-bit access to the peripheral register file.
///
/// Implementations must perform every call as a real bus transaction: no
/// caching, no merging of writes, no reordering. The register file is shared
/// with hardware, so two reads of the same offset may return different values.
pub trait RegisterIo {
    /// Read the 32-bit register at `offset`.
    fn read(&self, offset: usize) -> u32;

    /// Write `value` to the 32-bit register at `offset`.
    fn write(&mut self, offset: usize, value: u32);

    /// Read-modify-write: one read, then one write of `f(value)`.
    #[inline]
    fn modify<F>(&mut self, offset: usize, f: F)
    where
        F: FnOnce(u32) -> u32,
        Self: Sized,
    {
        let value = self.read(offset);
        self.write(offset, f(value));
    }

    /// Set `bits` in the register, preserving all others.
    #[inline]
    fn set_bits(&mut self, offset: usize, bits: u32) {
        let value = self.read(offset);
        self.write(offset, value | bits);
    }

    /// Clear `bits` in the register, preserving all others.
    #[inline]
    fn clear_bits(&mut self, offset: usize, bits: u32) {
        let value = self.read(offset);
        self.write(offset, value & !bits);
    }
}

impl<T: RegisterIo> RegisterIo for &mut T {
    #[inline]
    fn read(&self, offset: usize) -> u32 {
        (**self).read(offset)
    }

    #[inline]
    fn write(&mut self, offset: usize, value: u32) {
        (**self).write(offset, value);
    }
}

// =============================================================================
// Memory-Mapped Backend
// =============================================================================

/// Memory-mapped register file at a fixed physical base address.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MmioRegisters {
    base: usize,
}

impl MmioRegisters {
    /// Create a register file rooted at `base`.
    ///
    /// # Safety
    ///
    /// `base` must be the 4-byte aligned address of the MAC register block,
    /// mapped for device access, and no other `MmioRegisters` may alias it
    /// unless the integration layer serializes access.
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }

    /// Create a register file at the default base address (`0x43C0_0000`).
    ///
    /// # Safety
    ///
    /// Same contract as [`MmioRegisters::new`].
    pub const unsafe fn at_default_base() -> Self {
        // SAFETY: forwarded to the caller
        unsafe { Self::new(DEFAULT_BASE_ADDR) }
    }

    /// Create a register file, rejecting a base that is not 4-byte aligned.
    ///
    /// # Safety
    ///
    /// Same contract as [`MmioRegisters::new`] apart from alignment, which is
    /// checked here.
    pub unsafe fn try_new(base: usize) -> ConfigResult<Self> {
        if base % REGISTER_ALIGN != 0 {
            return Err(ConfigError::MisalignedBase);
        }
        // SAFETY: alignment checked above, the rest is the caller's contract
        Ok(unsafe { Self::new(base) })
    }

    /// Peripheral base address
    pub const fn base(&self) -> usize {
        self.base
    }
}

impl RegisterIo for MmioRegisters {
    #[inline(always)]
    fn read(&self, offset: usize) -> u32 {
        // SAFETY: construction guarantees `base` maps the register block
        unsafe { read_reg(self.base + offset) }
    }

    #[inline(always)]
    fn write(&mut self, offset: usize, value: u32) {
        // SAFETY: construction guarantees `base` maps the register block
        unsafe { write_reg(self.base + offset, value) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::internal::register::CTRL_OFFSET;
    use crate::testing::MockRegisters;

    #[test]
    fn try_new_rejects_misaligned_base() {
        // SAFETY: the handle is never used for access
        let result = unsafe { MmioRegisters::try_new(0x43C0_0002) };
        assert_eq!(result.unwrap_err(), ConfigError::MisalignedBase);
    }

    #[test]
    fn try_new_accepts_aligned_base() {
        // SAFETY: the handle is never used for access
        let regs = unsafe { MmioRegisters::try_new(0x43C0_0000) }.unwrap();
        assert_eq!(regs.base(), 0x43C0_0000);
    }

    #[test]
    fn default_base() {
        // SAFETY: the handle is never used for access
        let regs = unsafe { MmioRegisters::at_default_base() };
        assert_eq!(regs.base(), DEFAULT_BASE_ADDR);
    }

    #[test]
    fn mmio_accesses_base_plus_offset() {
        let mut block = [0u32; 4];
        let base = block.as_mut_ptr() as usize;
        // SAFETY: `block` is a live, aligned array covering offsets 0..16
        let mut regs = unsafe { MmioRegisters::new(base) };

        regs.write(0x08, 0x1234_5678);
        assert_eq!(regs.read(0x08), 0x1234_5678);
        assert_eq!(regs.read(0x00), 0);
        assert_eq!(block[2], 0x1234_5678);
    }

    #[test]
    fn set_and_clear_bits_preserve_others() {
        let mut regs = MockRegisters::new();
        regs.preset(CTRL_OFFSET, 0b1010);

        regs.set_bits(CTRL_OFFSET, 0b0001);
        assert_eq!(regs.peek(CTRL_OFFSET), 0b1011);

        regs.clear_bits(CTRL_OFFSET, 0b1000);
        assert_eq!(regs.peek(CTRL_OFFSET), 0b0011);
    }

    #[test]
    fn modify_is_one_read_and_one_write() {
        let mut regs = MockRegisters::new();
        regs.modify(CTRL_OFFSET, |v| v | 1);

        assert_eq!(regs.reads_of(CTRL_OFFSET), 1);
        assert_eq!(regs.writes_to(CTRL_OFFSET).len(), 1);
    }

    #[test]
    fn mutable_reference_forwards() {
        fn poke<R: RegisterIo>(mut io: R) -> u32 {
            io.set_bits(0x10, 0b100);
            io.read(0x10)
        }

        let mut regs = MockRegisters::new();
        regs.preset(0x10, 0b001);
        assert_eq!(poke(&mut regs), 0b101);
        assert_eq!(regs.peek(0x10), 0b101);
    }
}
