//! Core Ethernet MAC driver.
//!
//! This module contains the [`EthMac`] structure with:
//!
//! - Bring-up from a [`MacConfig`]
//! - Station configuration (MAC address, IP, gateway, netmask, IFG)
//! - ARP cache clear
//! - TX/RX/DMA path control
//! - Link status
//!
//! The descriptor engine lives in [`descriptor`](super::descriptor), the
//! interrupt dispatcher in [`interrupt`](super::interrupt) and frame
//! filtering in [`filtering`](super::filtering).
//!
//! # Control register discipline
//!
//! The control register carries five independent bits (TX, RX, DMA RX,
//! DMA TX, ARP clear). Every operation on it is a read-modify-write that
//! touches only its own bits. When the driver is also used from an interrupt
//! handler, wrap it in [`SharedMac`](crate::sync::SharedMac) (feature
//! `critical-section`) so these sequences cannot interleave.

use embedded_hal::delay::DelayNs;

use super::config::{LinkSpeed, MacConfig};
use crate::hal::bus::RegisterIo;
use crate::internal::constants::{ARP_CLEAR_HOLD_US, MAC_ADDR_LEN};
use crate::internal::register::{
    CTRL_CLEAR_ARP, CTRL_DMA_RX_EN, CTRL_DMA_TX_EN, CTRL_OFFSET, CTRL_RX_EN, CTRL_TX_EN,
    GATEWAY_IP_OFFSET, IFG_CONFIG_OFFSET, LOCAL_IP_OFFSET, MAC_ADDR_HIGH_OFFSET,
    MAC_ADDR_LOW_OFFSET, NETMASK_OFFSET, STATUS_OFFSET, STATUS_SPEED_MASK,
};

// =============================================================================
// Driver
// =============================================================================

/// Ethernet MAC driver
///
/// Owns the register backend `R` and nothing else: all state lives in the
/// peripheral's register file.
///
/// # Example
/// ```ignore
/// use eth_mac_lite::{EthMac, MacConfig, MmioRegisters};
///
/// let regs = unsafe { MmioRegisters::at_default_base() };
/// let mut mac = EthMac::new(regs);
///
/// mac.init(
///     &MacConfig::new()
///         .with_mac_address([0x00, 0x11, 0x22, 0x33, 0x44, 0x55])
///         .with_ip(0xC0A8_0164),
/// );
/// ```
#[derive(Debug)]
pub struct EthMac<R: RegisterIo> {
    pub(super) regs: R,
}

impl<R: RegisterIo> EthMac<R> {
    /// Create a driver over a register backend
    ///
    /// No register is touched until a method is called.
    pub const fn new(regs: R) -> Self {
        Self { regs }
    }

    /// Shared access to the register backend
    pub fn registers(&self) -> &R {
        &self.regs
    }

    /// Exclusive access to the register backend
    ///
    /// Direct register writes bypass the driver's read-modify-write
    /// discipline; use only when you accept responsibility for sequencing.
    pub fn registers_mut(&mut self) -> &mut R {
        &mut self.regs
    }

    /// Consume the driver and return the register backend
    pub fn release(self) -> R {
        self.regs
    }

    // =========================================================================
    // Bring-up
    // =========================================================================

    /// Apply a full configuration and enable the data paths
    ///
    /// Order: MAC address, IP, gateway, netmask, filter, inter-frame gap,
    /// interrupt enable, then TX MAC, RX MAC and finally both DMA paths.
    /// MAC paths are enabled before DMA as the hardware expects.
    pub fn init(&mut self, config: &MacConfig) {
        self.set_address(&config.mac_address);
        self.set_ip(config.ip);
        self.set_gateway(config.gateway);
        self.set_netmask(config.netmask);
        self.set_filter(config.filter);
        self.set_interframe_gap(config.ifg);
        self.irq_enable(config.irq_enabled);

        self.tx_enable(true);
        self.rx_enable(true);
        self.dma_enable(true, true);

        #[cfg(feature = "defmt")]
        defmt::info!(
            "MAC initialized, ctrl={:#x}, link {}",
            self.control(),
            self.link_speed()
        );
    }

    // =========================================================================
    // Station Configuration
    // =========================================================================

    /// Program the station MAC address
    ///
    /// Bytes 0..=3 go to the low register with byte 0 least significant;
    /// bytes 4..=5 go to the high register as `byte4 | byte5 << 8`.
    pub fn set_address(&mut self, mac: &[u8; MAC_ADDR_LEN]) {
        let low = u32::from_le_bytes([mac[0], mac[1], mac[2], mac[3]]);
        let high = u32::from_le_bytes([mac[4], mac[5], 0, 0]);

        self.regs.write(MAC_ADDR_LOW_OFFSET, low);
        self.regs.write(MAC_ADDR_HIGH_OFFSET, high);
    }

    /// Read back the station MAC address from both address registers
    pub fn mac_address(&self) -> [u8; MAC_ADDR_LEN] {
        let low = self.regs.read(MAC_ADDR_LOW_OFFSET).to_le_bytes();
        let high = self.regs.read(MAC_ADDR_HIGH_OFFSET).to_le_bytes();
        [low[0], low[1], low[2], low[3], high[0], high[1]]
    }

    /// Set the local IP address (written unchanged)
    pub fn set_ip(&mut self, ip: u32) {
        self.regs.write(LOCAL_IP_OFFSET, ip);
    }

    /// Set the gateway address (written unchanged)
    pub fn set_gateway(&mut self, gateway: u32) {
        self.regs.write(GATEWAY_IP_OFFSET, gateway);
    }

    /// Set the subnet mask (written unchanged)
    pub fn set_netmask(&mut self, netmask: u32) {
        self.regs.write(NETMASK_OFFSET, netmask);
    }

    /// Set the inter-frame gap in byte times (typically 12)
    ///
    /// No range check: out-of-range values go to hardware as-is.
    pub fn set_interframe_gap(&mut self, ifg: u8) {
        self.regs.write(IFG_CONFIG_OFFSET, u32::from(ifg));
    }

    /// Clear the hardware ARP cache
    ///
    /// Asserts the clear bit, holds it for [`ARP_CLEAR_HOLD_US`] using the
    /// platform delay, then deasserts it. Both steps re-read the control
    /// register so enable bits changed in between are preserved.
    pub fn clear_arp_cache<D: DelayNs>(&mut self, delay: &mut D) {
        self.regs.set_bits(CTRL_OFFSET, CTRL_CLEAR_ARP);
        delay.delay_us(ARP_CLEAR_HOLD_US);
        self.regs.clear_bits(CTRL_OFFSET, CTRL_CLEAR_ARP);

        #[cfg(feature = "defmt")]
        defmt::debug!("ARP cache cleared");
    }

    // =========================================================================
    // Control Plane
    // =========================================================================

    /// Enable or disable the MAC transmitter
    pub fn tx_enable(&mut self, enable: bool) {
        self.update_control(CTRL_TX_EN, enable);
    }

    /// Enable or disable the MAC receiver
    pub fn rx_enable(&mut self, enable: bool) {
        self.update_control(CTRL_RX_EN, enable);
    }

    /// Enable or disable the TX and RX DMA paths in one control write
    ///
    /// Enable the MAC paths first; the driver does not enforce the order.
    pub fn dma_enable(&mut self, tx: bool, rx: bool) {
        self.regs.modify(CTRL_OFFSET, |mut ctrl| {
            ctrl = apply_bit(ctrl, CTRL_DMA_TX_EN, tx);
            apply_bit(ctrl, CTRL_DMA_RX_EN, rx)
        });
    }

    /// Raw control register value
    pub fn control(&self) -> u32 {
        self.regs.read(CTRL_OFFSET)
    }

    /// Whether the MAC transmitter is enabled
    pub fn is_tx_enabled(&self) -> bool {
        self.control() & CTRL_TX_EN != 0
    }

    /// Whether the MAC receiver is enabled
    pub fn is_rx_enabled(&self) -> bool {
        self.control() & CTRL_RX_EN != 0
    }

    /// DMA enable state as `(tx, rx)`
    pub fn is_dma_enabled(&self) -> (bool, bool) {
        let ctrl = self.control();
        (ctrl & CTRL_DMA_TX_EN != 0, ctrl & CTRL_DMA_RX_EN != 0)
    }

    fn update_control(&mut self, bit: u32, enable: bool) {
        self.regs.modify(CTRL_OFFSET, |ctrl| apply_bit(ctrl, bit, enable));
    }

    // =========================================================================
    // Status
    // =========================================================================

    /// Current link speed
    pub fn link_speed(&self) -> LinkSpeed {
        LinkSpeed::from_bits(self.link_speed_raw())
    }

    /// Raw 2-bit link speed field
    pub fn link_speed_raw(&self) -> u32 {
        self.regs.read(STATUS_OFFSET) & STATUS_SPEED_MASK
    }
}

#[inline]
const fn apply_bit(value: u32, bit: u32, set: bool) -> u32 {
    if set { value | bit } else { value & !bit }
}

// =============================================================================
// Unit Tests
// =============================================================================
