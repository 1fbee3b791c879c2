//! Lightweight Ethernet MAC Driver
//!
//! A `no_std`, `no_alloc` driver for a minimal memory-mapped Ethernet MAC
//! with single-slot DMA descriptors, as found in FPGA soft-IP designs.
//!
//! The peripheral exposes a small register file: a control register, link
//! status, station MAC/IP/gateway/netmask, a frame filter, an inter-frame
//! gap, a write-1-to-clear interrupt status register and one TX plus one RX
//! descriptor block. The driver owns no buffers and no state of its own:
//! callers hand it physical buffer addresses and the hardware is the only
//! source of truth.
//!
//! # Architecture
//!
//! 1. **Register access** ([`hal`]): the [`RegisterIo`] trait and the
//!    volatile [`MmioRegisters`] backend
//! 2. **Driver** ([`driver`]): [`EthMac`] with configuration, control plane,
//!    descriptor engine, interrupt dispatcher and status reader
//! 3. **Concurrency** (`sync`, feature `critical-section`): ISR-safe
//!    [`SharedMac`](sync::SharedMac) and, with `async`, waker-driven
//!    descriptor futures
//!
//! # Features
//!
//! - `defmt`: Enable defmt logging and `defmt::Format` on public types
//! - `critical-section`: Enable ISR-safe `SharedMac` wrapper
//! - `async`: Enable async/await support with wakers
//!
//! # Example
//!
//! ```ignore
//! use eth_mac_lite::{EthMac, FilterConfig, MacConfig, MmioRegisters};
//!
//! let regs = unsafe { MmioRegisters::at_default_base() };
//! let mut mac = EthMac::new(regs);
//!
//! mac.init(
//!     &MacConfig::new()
//!         .with_mac_address([0x00, 0x11, 0x22, 0x33, 0x44, 0x55])
//!         .with_ip(0xC0A8_0164)
//!         .with_gateway(0xC0A8_0101)
//!         .with_netmask(0xFFFF_FF00)
//!         .with_filter(FilterConfig::unicast_and_broadcast()),
//! );
//!
//! // Transmit a frame already placed in DMA memory
//! mac.send(TX_BUF_PHYS, 64, 0x01)?;
//!
//! // From the interrupt handler
//! mac.isr(&mut my_handler);
//! ```

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
// Clippy lint levels live in Cargo.toml.
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::fn_params_excessive_bools,
    clippy::struct_excessive_bools,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

// =============================================================================
// Modules
// =============================================================================

pub mod driver;
pub mod hal;

// Internal implementation details (pub(crate) only)
mod internal;

#[cfg(feature = "critical-section")]
#[cfg_attr(docsrs, doc(cfg(feature = "critical-section")))]
pub mod sync;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use driver::config::{Direction, FilterConfig, LinkSpeed, MacConfig, SlotState};
pub use driver::error::{
    ConfigError, ConfigResult, DmaError, DmaResult, Error, IoError, IoResult, Result,
};
pub use driver::interrupt::{InterruptHandler, InterruptStatus};
pub use driver::mac::EthMac;
pub use hal::bus::{MmioRegisters, RegisterIo};

/// Register map of the peripheral
///
/// Byte offsets from the base address and the bit layout of each register.
/// Useful for custom [`RegisterIo`] backends and for diagnostics.
pub mod registers {
    pub use crate::internal::register::{
        CTRL_CLEAR_ARP, CTRL_DMA_RX_EN, CTRL_DMA_TX_EN, CTRL_OFFSET, CTRL_RX_EN, CTRL_TX_EN,
        DESC_VALID, FILTER_BROADCAST, FILTER_CONFIG_OFFSET, FILTER_ENABLE, FILTER_MULTICAST,
        FILTER_PROMISCUOUS, GATEWAY_IP_OFFSET, IFG_CONFIG_OFFSET, IRQ_ALL, IRQ_ENABLE_OFFSET,
        IRQ_ENABLE_ON, IRQ_RX_DONE, IRQ_RX_ERROR, IRQ_STATUS_OFFSET, IRQ_TX_DONE, IRQ_TX_ERROR,
        LOCAL_IP_OFFSET, MAC_ADDR_HIGH_OFFSET, MAC_ADDR_LOW_OFFSET, NETMASK_OFFSET,
        RX_DESC_ADDR_OFFSET, RX_DESC_LEN_OFFSET, RX_DESC_TAG_OFFSET, RX_DESC_VALID_OFFSET,
        RX_LEN_MASK, STATUS_OFFSET, STATUS_SPEED_10M, STATUS_SPEED_100M, STATUS_SPEED_1000M,
        STATUS_SPEED_MASK, TX_DESC_ADDR_OFFSET, TX_DESC_LEN_OFFSET, TX_DESC_TAG_OFFSET,
        TX_DESC_VALID_OFFSET,
    };
}

/// Driver-wide constants
pub mod constants {
    pub use crate::internal::constants::{
        ARP_CLEAR_HOLD_US, DEFAULT_BASE_ADDR, DEFAULT_IFG, DEFAULT_MAC_ADDR, MAC_ADDR_LEN,
        REGISTER_ALIGN,
    };
}
