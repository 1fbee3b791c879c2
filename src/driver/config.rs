//! Configuration types for the Ethernet MAC driver

use crate::internal::constants::{DEFAULT_IFG, DEFAULT_MAC_ADDR, MAC_ADDR_LEN};
use crate::internal::register::{
    FILTER_BROADCAST, FILTER_ENABLE, FILTER_MULTICAST, FILTER_PROMISCUOUS, STATUS_SPEED_10M,
    STATUS_SPEED_100M, STATUS_SPEED_1000M, STATUS_SPEED_MASK,
};

// =============================================================================
// Link Speed
// =============================================================================

/// Ethernet link speed as reported by the status register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkSpeed {
    /// 10 Mbps
    Mbps10,
    /// 100 Mbps
    Mbps100,
    /// 1000 Mbps
    Mbps1000,
    /// Reserved encoding
    Unknown,
}

impl LinkSpeed {
    /// Decode the 2-bit speed field (upper bits are ignored)
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        match bits & STATUS_SPEED_MASK {
            STATUS_SPEED_10M => LinkSpeed::Mbps10,
            STATUS_SPEED_100M => LinkSpeed::Mbps100,
            STATUS_SPEED_1000M => LinkSpeed::Mbps1000,
            _ => LinkSpeed::Unknown,
        }
    }

    /// Speed in megabits per second, `None` for a reserved encoding
    #[must_use]
    pub const fn mbps(self) -> Option<u32> {
        match self {
            LinkSpeed::Mbps10 => Some(10),
            LinkSpeed::Mbps100 => Some(100),
            LinkSpeed::Mbps1000 => Some(1000),
            LinkSpeed::Unknown => None,
        }
    }

    /// Human-readable speed
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            LinkSpeed::Mbps10 => "10 Mbps",
            LinkSpeed::Mbps100 => "100 Mbps",
            LinkSpeed::Mbps1000 => "1000 Mbps",
            LinkSpeed::Unknown => "Unknown",
        }
    }
}

impl core::fmt::Display for LinkSpeed {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Descriptor Slot State
// =============================================================================

/// Ownership state of a single-slot DMA descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotState {
    /// Validity bit clear: software may program the descriptor
    #[default]
    Idle,
    /// Validity bit set: hardware owns the buffer
    Submitted,
}

/// Transfer direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Receive (hardware writes into the buffer)
    Rx,
    /// Transmit (hardware reads from the buffer)
    Tx,
}

// =============================================================================
// Frame Filter
// =============================================================================

/// Frame filter policy
///
/// Each flag maps to one bit of the filter configuration register; the
/// whole policy is written in a single register write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FilterConfig {
    /// Enable destination address filtering
    pub enable: bool,
    /// Accept every frame regardless of destination
    pub promiscuous: bool,
    /// Accept broadcast frames
    pub broadcast: bool,
    /// Accept multicast frames
    pub multicast: bool,
}

impl FilterConfig {
    /// Build a filter policy from its four flags
    #[must_use]
    pub const fn new(enable: bool, promiscuous: bool, broadcast: bool, multicast: bool) -> Self {
        Self {
            enable,
            promiscuous,
            broadcast,
            multicast,
        }
    }

    /// Filtering off
    #[must_use]
    pub const fn disabled() -> Self {
        Self::new(false, false, false, false)
    }

    /// Only frames addressed to the station MAC
    #[must_use]
    pub const fn unicast_only() -> Self {
        Self::new(true, false, false, false)
    }

    /// Station MAC plus broadcast
    #[must_use]
    pub const fn unicast_and_broadcast() -> Self {
        Self::new(true, false, true, false)
    }

    /// Promiscuous reception
    #[must_use]
    pub const fn accept_all() -> Self {
        Self::new(true, true, false, false)
    }

    /// Encode as the filter configuration register value
    #[must_use]
    pub const fn to_bits(self) -> u32 {
        let mut bits = 0;
        if self.enable {
            bits |= FILTER_ENABLE;
        }
        if self.promiscuous {
            bits |= FILTER_PROMISCUOUS;
        }
        if self.broadcast {
            bits |= FILTER_BROADCAST;
        }
        if self.multicast {
            bits |= FILTER_MULTICAST;
        }
        bits
    }

    /// Decode a filter configuration register value (unknown bits ignored)
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self {
            enable: bits & FILTER_ENABLE != 0,
            promiscuous: bits & FILTER_PROMISCUOUS != 0,
            broadcast: bits & FILTER_BROADCAST != 0,
            multicast: bits & FILTER_MULTICAST != 0,
        }
    }
}

// =============================================================================
// MAC Configuration
// =============================================================================

/// Complete MAC configuration applied by [`EthMac::init`](super::mac::EthMac::init)
///
/// The driver keeps no copy once applied; the register file is the source
/// of truth afterwards. Addresses are passed through unchanged, so supply
/// them in the byte order the hardware expects.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MacConfig {
    /// Station MAC address
    pub mac_address: [u8; MAC_ADDR_LEN],
    /// Local IPv4 address
    pub ip: u32,
    /// Gateway IPv4 address
    pub gateway: u32,
    /// Subnet mask
    pub netmask: u32,
    /// Frame filter policy
    pub filter: FilterConfig,
    /// Inter-frame gap in byte times
    pub ifg: u8,
    /// Let the peripheral assert its interrupt line
    pub irq_enabled: bool,
}

impl Default for MacConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl MacConfig {
    /// Create a new configuration with defaults
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mac_address: DEFAULT_MAC_ADDR,
            ip: 0,
            gateway: 0,
            netmask: 0,
            filter: FilterConfig::unicast_and_broadcast(),
            ifg: DEFAULT_IFG,
            irq_enabled: true,
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Set the MAC address
    #[must_use]
    pub const fn with_mac_address(mut self, addr: [u8; MAC_ADDR_LEN]) -> Self {
        self.mac_address = addr;
        self
    }

    /// Set the local IP address
    #[must_use]
    pub const fn with_ip(mut self, ip: u32) -> Self {
        self.ip = ip;
        self
    }

    /// Set the gateway address
    #[must_use]
    pub const fn with_gateway(mut self, gateway: u32) -> Self {
        self.gateway = gateway;
        self
    }

    /// Set the subnet mask
    #[must_use]
    pub const fn with_netmask(mut self, netmask: u32) -> Self {
        self.netmask = netmask;
        self
    }

    /// Set the frame filter policy
    #[must_use]
    pub const fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    /// Set the inter-frame gap
    ///
    /// The value is not range checked; hardware is the final arbiter.
    #[must_use]
    pub const fn with_ifg(mut self, ifg: u8) -> Self {
        self.ifg = ifg;
        self
    }

    /// Enable or disable the interrupt line
    #[must_use]
    pub const fn with_irq_enabled(mut self, enabled: bool) -> Self {
        self.irq_enabled = enabled;
        self
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
