//! Interrupt dispatch for the Ethernet MAC.
//!
//! This module provides the [`InterruptStatus`] structure for parsing the
//! interrupt status register, the [`InterruptHandler`] callback trait, and
//! [`EthMac::isr`], the single entry point to call when the peripheral's
//! interrupt line fires.
//!
//! The status register is write-1-to-clear and bits accumulate until
//! cleared. The dispatcher takes one snapshot, handles every condition in
//! it, and clears each handled bit with its own single-bit write. A bit set
//! by hardware after the snapshot is never cleared by accident and will be
//! seen on the next invocation.

use super::error::{IoError, IoResult};
use super::mac::EthMac;
use crate::hal::bus::RegisterIo;
use crate::internal::register::{
    IRQ_ENABLE_OFFSET, IRQ_ENABLE_ON, IRQ_RX_DONE, IRQ_RX_ERROR, IRQ_STATUS_OFFSET, IRQ_TX_DONE,
    IRQ_TX_ERROR,
};

// =============================================================================
// Interrupt Status
// =============================================================================

/// Interrupt status flags parsed from the IRQ status register.
///
/// # Example
///
/// ```ignore
/// let status = mac.irq_status();
/// if status.rx_done {
///     let len = mac.rx_length();
/// }
/// if status.has_error() {
///     // Drop the frame and re-arm the descriptor
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptStatus {
    /// RX descriptor completed
    pub rx_done: bool,
    /// TX descriptor completed
    pub tx_done: bool,
    /// Receive error
    pub rx_error: bool,
    /// Transmit error
    pub tx_error: bool,
}

impl InterruptStatus {
    /// Create from raw IRQ status register value (undefined bits ignored)
    #[inline]
    pub const fn from_raw(status: u32) -> Self {
        Self {
            rx_done: (status & IRQ_RX_DONE) != 0,
            tx_done: (status & IRQ_TX_DONE) != 0,
            rx_error: (status & IRQ_RX_ERROR) != 0,
            tx_error: (status & IRQ_TX_ERROR) != 0,
        }
    }

    /// Convert to raw value for clearing (write-1-to-clear)
    #[inline]
    pub const fn to_raw(&self) -> u32 {
        let mut val = 0u32;
        if self.rx_done {
            val |= IRQ_RX_DONE;
        }
        if self.tx_done {
            val |= IRQ_TX_DONE;
        }
        if self.rx_error {
            val |= IRQ_RX_ERROR;
        }
        if self.tx_error {
            val |= IRQ_TX_ERROR;
        }
        val
    }

    /// Check if any condition is pending
    #[inline]
    pub const fn any(&self) -> bool {
        self.rx_done || self.tx_done || self.rx_error || self.tx_error
    }

    /// Check if any error condition is pending
    #[inline]
    pub const fn has_error(&self) -> bool {
        self.rx_error || self.tx_error
    }

    /// First pending error as an [`IoError`], RX before TX
    pub const fn check(&self) -> IoResult<()> {
        if self.rx_error {
            Err(IoError::RxError)
        } else if self.tx_error {
            Err(IoError::TxError)
        } else {
            Ok(())
        }
    }
}

// =============================================================================
// Handler
// =============================================================================

/// Actions taken by [`EthMac::isr`] for each pending condition.
///
/// Every method defaults to doing nothing. Error callbacks are where the
/// caller decides what to do with the failed descriptor; the driver never
/// retries on its own.
///
/// # Example
///
/// ```ignore
/// struct Stack { rx_ready: Option<u32>, tx_failed: bool }
///
/// impl InterruptHandler for Stack {
///     fn on_rx_done(&mut self, len: u32) { self.rx_ready = Some(len); }
///     fn on_tx_error(&mut self) { self.tx_failed = true; }
/// }
/// ```
pub trait InterruptHandler {
    /// A frame of `len` bytes landed in the RX buffer
    fn on_rx_done(&mut self, len: u32) {
        let _ = len;
    }

    /// The TX descriptor completed
    fn on_tx_done(&mut self) {}

    /// Hardware reported a receive error
    fn on_rx_error(&mut self) {}

    /// Hardware reported a transmit error
    fn on_tx_error(&mut self) {}
}

/// Acknowledge-only handler
impl InterruptHandler for () {}

impl<H: InterruptHandler + ?Sized> InterruptHandler for &mut H {
    fn on_rx_done(&mut self, len: u32) {
        (**self).on_rx_done(len);
    }

    fn on_tx_done(&mut self) {
        (**self).on_tx_done();
    }

    fn on_rx_error(&mut self) {
        (**self).on_rx_error();
    }

    fn on_tx_error(&mut self) {
        (**self).on_tx_error();
    }
}

// =============================================================================
// Dispatcher
// =============================================================================

impl<R: RegisterIo> EthMac<R> {
    /// Let the peripheral assert its interrupt line (or not)
    ///
    /// With the line disabled, status bits still accumulate and can be
    /// drained by polling [`irq_status`](Self::irq_status).
    pub fn irq_enable(&mut self, enable: bool) {
        self.regs
            .write(IRQ_ENABLE_OFFSET, if enable { IRQ_ENABLE_ON } else { 0 });
    }

    /// Pending interrupt conditions (no side effects)
    pub fn irq_status(&self) -> InterruptStatus {
        InterruptStatus::from_raw(self.irq_status_raw())
    }

    /// Raw interrupt status register value
    pub fn irq_status_raw(&self) -> u32 {
        self.regs.read(IRQ_STATUS_OFFSET)
    }

    /// Clear the conditions in `mask` (write-1-to-clear)
    ///
    /// Bits not in `mask` are left pending.
    pub fn clear_irq(&mut self, mask: u32) {
        self.regs.write(IRQ_STATUS_OFFSET, mask);
    }

    /// Interrupt service routine
    ///
    /// Reads the status register once and, for each condition present, runs
    /// the handler action and then clears exactly that bit:
    ///
    /// 1. RX done: reads [`rx_length`](Self::rx_length), calls `on_rx_done`
    /// 2. TX done: calls `on_tx_done`
    /// 3. RX error: calls `on_rx_error`
    /// 4. TX error: calls `on_tx_error`
    ///
    /// Returns the snapshot that was handled.
    pub fn isr<H: InterruptHandler>(&mut self, mut handler: H) -> InterruptStatus {
        let status = self.irq_status();

        if status.rx_done {
            let len = self.rx_length();
            handler.on_rx_done(len);
            self.clear_irq(IRQ_RX_DONE);
        }

        if status.tx_done {
            handler.on_tx_done();
            self.clear_irq(IRQ_TX_DONE);
        }

        if status.rx_error {
            #[cfg(feature = "defmt")]
            defmt::warn!("RX error interrupt");
            handler.on_rx_error();
            self.clear_irq(IRQ_RX_ERROR);
        }

        if status.tx_error {
            #[cfg(feature = "defmt")]
            defmt::warn!("TX error interrupt");
            handler.on_tx_error();
            self.clear_irq(IRQ_TX_ERROR);
        }

        status
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
