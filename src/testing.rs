//! Testing utilities and mock implementations
//!
//! This module provides mock implementations for testing the driver
//! on the host without hardware access.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::RefCell;
use std::boxed::Box;
use std::collections::HashMap;
use std::rc::Rc;
use std::vec::Vec;

use crate::hal::bus::RegisterIo;
use crate::internal::register::{
    DESC_VALID, IRQ_RX_DONE, IRQ_RX_ERROR, IRQ_STATUS_OFFSET, IRQ_TX_DONE, IRQ_TX_ERROR,
    RX_DESC_LEN_OFFSET, RX_DESC_VALID_OFFSET, TX_DESC_VALID_OFFSET,
};

// =============================================================================
// Mock Register File
// =============================================================================

/// One bus transaction seen by the mock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read(usize),
    Write(usize, u32),
}

impl Access {
    pub fn is_read_of(&self, offset: usize) -> bool {
        matches!(self, Access::Read(o) if *o == offset)
    }

    pub fn is_write_of(&self, offset: usize) -> bool {
        matches!(self, Access::Write(o, _) if *o == offset)
    }
}

#[derive(Debug, Default)]
struct State {
    registers: HashMap<usize, u32>,
    log: Vec<Access>,
    /// IRQ bits hardware asserts right after the next status read
    irq_after_status_read: u32,
}

/// In-memory register file
///
/// Behaves like the peripheral from the driver's point of view:
/// - unwritten registers read as 0
/// - the IRQ status register is write-1-to-clear
/// - every access is recorded in order
///
/// Clones share the same register file, so a test can keep a "hardware side"
/// handle while the driver owns another.
///
/// # Example
///
/// ```ignore
/// let mut mac = EthMac::new(MockRegisters::new());
/// mac.send(0x1000, 64, 1).unwrap();
/// mac.registers().complete_tx();
/// assert!(!mac.is_tx_busy());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockRegisters {
    state: Rc<RefCell<State>>,
}

impl MockRegisters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Another handle onto the same register file
    pub fn handle(&self) -> Self {
        self.clone()
    }

    /// Set a register value as hardware would (not logged, no W1C)
    pub fn preset(&self, offset: usize, value: u32) {
        self.state.borrow_mut().registers.insert(offset, value);
    }

    /// Current register value (not logged)
    pub fn peek(&self, offset: usize) -> u32 {
        self.state
            .borrow()
            .registers
            .get(&offset)
            .copied()
            .unwrap_or(0)
    }

    /// Every access in order
    pub fn access_log(&self) -> Vec<Access> {
        self.state.borrow().log.clone()
    }

    /// Every write as `(offset, value)` in order
    pub fn all_writes(&self) -> Vec<(usize, u32)> {
        self.state
            .borrow()
            .log
            .iter()
            .filter_map(|a| match a {
                Access::Write(o, v) => Some((*o, *v)),
                Access::Read(_) => None,
            })
            .collect()
    }

    /// Values written to one register in order
    pub fn writes_to(&self, offset: usize) -> Vec<u32> {
        self.all_writes()
            .into_iter()
            .filter(|(o, _)| *o == offset)
            .map(|(_, v)| v)
            .collect()
    }

    /// Number of reads of one register
    pub fn reads_of(&self, offset: usize) -> usize {
        self.state
            .borrow()
            .log
            .iter()
            .filter(|a| a.is_read_of(offset))
            .count()
    }

    /// Forget all recorded accesses
    pub fn clear_log(&self) {
        self.state.borrow_mut().log.clear();
    }

    // =========================================================================
    // Hardware Simulation
    // =========================================================================

    /// Hardware asserts interrupt condition bits
    pub fn raise_irq(&self, bits: u32) {
        let mut state = self.state.borrow_mut();
        *state.registers.entry(IRQ_STATUS_OFFSET).or_insert(0) |= bits;
    }

    /// Hardware asserts bits just after the driver's next status read
    ///
    /// Models a condition arriving while the dispatcher is running.
    pub fn raise_irq_after_status_read(&self, bits: u32) {
        self.state.borrow_mut().irq_after_status_read |= bits;
    }

    /// Hardware finishes the TX descriptor successfully
    pub fn complete_tx(&self) {
        self.preset(TX_DESC_VALID_OFFSET, 0);
        self.raise_irq(IRQ_TX_DONE);
    }

    /// Hardware fills the RX buffer with `len` bytes
    pub fn complete_rx(&self, len: u32) {
        self.preset(RX_DESC_LEN_OFFSET, len);
        self.preset(RX_DESC_VALID_OFFSET, 0);
        self.raise_irq(IRQ_RX_DONE);
    }

    /// Hardware abandons the TX descriptor with an error
    pub fn fail_tx(&self) {
        self.preset(TX_DESC_VALID_OFFSET, 0);
        self.raise_irq(IRQ_TX_ERROR);
    }

    /// Hardware abandons the RX descriptor with an error
    pub fn fail_rx(&self) {
        self.preset(RX_DESC_VALID_OFFSET, 0);
        self.raise_irq(IRQ_RX_ERROR);
    }

    /// Whether hardware currently owns the TX slot
    pub fn tx_valid(&self) -> bool {
        self.peek(TX_DESC_VALID_OFFSET) & DESC_VALID != 0
    }

    /// Whether hardware currently owns the RX slot
    pub fn rx_valid(&self) -> bool {
        self.peek(RX_DESC_VALID_OFFSET) & DESC_VALID != 0
    }
}

impl RegisterIo for MockRegisters {
    fn read(&self, offset: usize) -> u32 {
        let mut state = self.state.borrow_mut();
        state.log.push(Access::Read(offset));
        let value = state.registers.get(&offset).copied().unwrap_or(0);

        if offset == IRQ_STATUS_OFFSET && state.irq_after_status_read != 0 {
            let late = core::mem::take(&mut state.irq_after_status_read);
            *state.registers.entry(IRQ_STATUS_OFFSET).or_insert(0) |= late;
        }

        value
    }

    fn write(&mut self, offset: usize, value: u32) {
        let mut state = self.state.borrow_mut();
        state.log.push(Access::Write(offset, value));

        let slot = state.registers.entry(offset).or_insert(0);
        if offset == IRQ_STATUS_OFFSET {
            *slot &= !value;
        } else {
            *slot = value;
        }
    }
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Mock delay for testing without actual timing
///
/// Records delays for verification without actually waiting. An optional
/// hook runs on every delay call, standing in for whatever else the system
/// does while the driver waits.
#[derive(Default)]
pub struct MockDelay {
    /// Total nanoseconds delayed
    total_ns: RefCell<u64>,
    hook: Option<Box<dyn FnMut()>>,
}

impl MockDelay {
    /// Create a new mock delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock delay that runs `hook` during every wait
    pub fn with_hook<F: FnMut() + 'static>(hook: F) -> Self {
        Self {
            total_ns: RefCell::new(0),
            hook: Some(Box::new(hook)),
        }
    }

    /// Get total nanoseconds that were "delayed"
    pub fn total_ns(&self) -> u64 {
        *self.total_ns.borrow()
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        *self.total_ns.borrow_mut() += ns as u64;
        if let Some(hook) = self.hook.as_mut() {
            hook();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec;

    #[test]
    fn unwritten_registers_read_zero() {
        let regs = MockRegisters::new();
        assert_eq!(regs.read(0x00), 0);
        assert_eq!(regs.read(0x4C), 0);
    }

    #[test]
    fn writes_are_stored_and_logged() {
        let mut regs = MockRegisters::new();
        regs.write(0x10, 0x1234);
        regs.write(0x10, 0x5678);

        assert_eq!(regs.read(0x10), 0x5678);
        assert_eq!(regs.writes_to(0x10), vec![0x1234, 0x5678]);
        assert_eq!(
            regs.access_log(),
            vec![
                Access::Write(0x10, 0x1234),
                Access::Write(0x10, 0x5678),
                Access::Read(0x10),
            ]
        );
    }

    #[test]
    fn irq_status_is_write_one_to_clear() {
        let mut regs = MockRegisters::new();
        regs.raise_irq(0b1011);

        regs.write(IRQ_STATUS_OFFSET, 0b0001);
        assert_eq!(regs.peek(IRQ_STATUS_OFFSET), 0b1010);

        regs.write(IRQ_STATUS_OFFSET, 0b0100);
        assert_eq!(regs.peek(IRQ_STATUS_OFFSET), 0b1010);

        regs.write(IRQ_STATUS_OFFSET, 0b1111);
        assert_eq!(regs.peek(IRQ_STATUS_OFFSET), 0);
    }

    #[test]
    fn late_irq_lands_after_read() {
        let regs = MockRegisters::new();
        regs.raise_irq(IRQ_RX_DONE);
        regs.raise_irq_after_status_read(IRQ_TX_DONE);

        assert_eq!(regs.read(IRQ_STATUS_OFFSET), IRQ_RX_DONE);
        assert_eq!(regs.read(IRQ_STATUS_OFFSET), IRQ_RX_DONE | IRQ_TX_DONE);
    }

    #[test]
    fn handles_share_state() {
        let mut regs = MockRegisters::new();
        let hw = regs.handle();

        regs.write(TX_DESC_VALID_OFFSET, 1);
        assert!(hw.tx_valid());

        hw.complete_tx();
        assert!(!regs.tx_valid());
        assert_eq!(regs.peek(IRQ_STATUS_OFFSET), IRQ_TX_DONE);
    }

    #[test]
    fn complete_rx_sets_length() {
        let regs = MockRegisters::new();
        regs.preset(RX_DESC_VALID_OFFSET, 1);
        regs.complete_rx(128);

        assert!(!regs.rx_valid());
        assert_eq!(regs.peek(RX_DESC_LEN_OFFSET), 128);
        assert_eq!(regs.peek(IRQ_STATUS_OFFSET), IRQ_RX_DONE);
    }

    #[test]
    fn mock_delay_tracking() {
        let mut delay = MockDelay::new();

        embedded_hal::delay::DelayNs::delay_ns(&mut delay, 1000);
        embedded_hal::delay::DelayNs::delay_us(&mut delay, 2);

        assert_eq!(delay.total_ns(), 3000);
    }

    #[test]
    fn mock_delay_runs_hook() {
        let regs = MockRegisters::new();
        let hw = regs.handle();
        let mut delay = MockDelay::with_hook(move || hw.raise_irq(IRQ_TX_ERROR));

        embedded_hal::delay::DelayNs::delay_ns(&mut delay, 1);
        assert_eq!(regs.peek(IRQ_STATUS_OFFSET), IRQ_TX_ERROR);
    }
}
