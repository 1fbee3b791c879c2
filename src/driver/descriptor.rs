//! Single-slot DMA descriptor engine.
//!
//! The hardware has exactly one TX and one RX descriptor slot. Each slot is
//! a block of four registers (address, length, tag, valid) and moves through
//! two states:
//!
//! ```text
//!   Idle ──send/receive──▶ Submitted ──hardware clears valid──▶ Idle
//! ```
//!
//! A submission while the slot is `Submitted` is rejected with
//! [`DmaError::Busy`]; nothing is queued and nothing blocks. Completion can be
//! observed by polling [`EthMac::tx_state`] / [`EthMac::rx_state`] or by the
//! done interrupt; both work and neither is required.
//!
//! There is no way to revoke a submitted descriptor short of a hardware reset.

use super::config::{Direction, SlotState};
use super::error::{DmaError, DmaResult};
use super::mac::EthMac;
use crate::hal::bus::RegisterIo;
use crate::internal::register::{
    DESC_VALID, RX_DESC_ADDR_OFFSET, RX_DESC_LEN_OFFSET, RX_DESC_TAG_OFFSET,
    RX_DESC_VALID_OFFSET, RX_LEN_MASK, TX_DESC_ADDR_OFFSET, TX_DESC_LEN_OFFSET,
    TX_DESC_TAG_OFFSET, TX_DESC_VALID_OFFSET,
};

/// Register offsets of one descriptor slot
struct SlotRegs {
    addr: usize,
    len: usize,
    tag: usize,
    valid: usize,
}

impl Direction {
    const fn slot(self) -> SlotRegs {
        match self {
            Direction::Rx => SlotRegs {
                addr: RX_DESC_ADDR_OFFSET,
                len: RX_DESC_LEN_OFFSET,
                tag: RX_DESC_TAG_OFFSET,
                valid: RX_DESC_VALID_OFFSET,
            },
            Direction::Tx => SlotRegs {
                addr: TX_DESC_ADDR_OFFSET,
                len: TX_DESC_LEN_OFFSET,
                tag: TX_DESC_TAG_OFFSET,
                valid: TX_DESC_VALID_OFFSET,
            },
        }
    }
}

impl<R: RegisterIo> EthMac<R> {
    /// Submit a frame for transmission
    ///
    /// `buffer_addr` must be DMA-addressable physical memory that stays valid
    /// until the slot returns to [`SlotState::Idle`]. `tag` is echoed for
    /// caller-side correlation.
    ///
    /// # Errors
    ///
    /// [`DmaError::Busy`] if the previous transmission is still owned by
    /// hardware. No descriptor register is written in that case.
    ///
    /// # Example
    /// ```ignore
    /// match mac.send(tx_buf_phys, 64, 0x01) {
    ///     Ok(()) => {}
    ///     Err(DmaError::Busy) => { /* retry after TX done */ }
    /// }
    /// ```
    pub fn send(&mut self, buffer_addr: u32, length: u32, tag: u8) -> DmaResult<()> {
        self.submit(Direction::Tx, buffer_addr, length, tag)
    }

    /// Hand a buffer to hardware for the next received frame
    ///
    /// The buffer must hold at least `max_length` bytes. After the RX done
    /// condition, [`rx_length`](Self::rx_length) reports how many bytes
    /// arrived.
    ///
    /// # Errors
    ///
    /// [`DmaError::Busy`] if a receive buffer is already armed.
    pub fn receive(&mut self, buffer_addr: u32, max_length: u32, tag: u8) -> DmaResult<()> {
        self.submit(Direction::Rx, buffer_addr, max_length, tag)
    }

    /// Bytes received into the last completed RX descriptor
    ///
    /// Only meaningful after RX done has been observed; before that the
    /// value is stale or the requested maximum.
    pub fn rx_length(&self) -> u32 {
        self.regs.read(RX_DESC_LEN_OFFSET) & RX_LEN_MASK
    }

    /// Ownership state of a descriptor slot
    pub fn slot_state(&self, direction: Direction) -> SlotState {
        if self.regs.read(direction.slot().valid) & DESC_VALID != 0 {
            SlotState::Submitted
        } else {
            SlotState::Idle
        }
    }

    /// Ownership state of the TX slot
    pub fn tx_state(&self) -> SlotState {
        self.slot_state(Direction::Tx)
    }

    /// Ownership state of the RX slot
    pub fn rx_state(&self) -> SlotState {
        self.slot_state(Direction::Rx)
    }

    /// Whether hardware still owns the TX slot
    pub fn is_tx_busy(&self) -> bool {
        self.tx_state() == SlotState::Submitted
    }

    /// Whether hardware still owns the RX slot
    pub fn is_rx_busy(&self) -> bool {
        self.rx_state() == SlotState::Submitted
    }

    fn submit(&mut self, direction: Direction, addr: u32, len: u32, tag: u8) -> DmaResult<()> {
        if self.slot_state(direction) == SlotState::Submitted {
            #[cfg(feature = "defmt")]
            defmt::trace!("{} descriptor busy", direction);
            return Err(DmaError::Busy);
        }

        let slot = direction.slot();
        self.regs.write(slot.addr, addr);
        self.regs.write(slot.len, len);
        self.regs.write(slot.tag, u32::from(tag));
        // Valid last: hardware takes ownership on this write
        self.regs.write(slot.valid, DESC_VALID);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
