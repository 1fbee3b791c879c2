//! Centralized Constants
//!
//! Single source of truth for the magic numbers used throughout the driver.
//! Register offsets and bit definitions live in `internal::register`.

// =============================================================================
// Addressing
// =============================================================================

/// Default peripheral base address of the MAC register file
pub const DEFAULT_BASE_ADDR: usize = 0x43C0_0000;

/// Required alignment of the register file base address (32-bit registers)
pub const REGISTER_ALIGN: usize = 4;

// =============================================================================
// MAC Address
// =============================================================================

/// MAC address length in bytes
pub const MAC_ADDR_LEN: usize = 6;

/// Default MAC address (locally administered)
pub const DEFAULT_MAC_ADDR: [u8; MAC_ADDR_LEN] = [0x02, 0x00, 0x00, 0x00, 0x00, 0x01];

// =============================================================================
// Frame Timing
// =============================================================================

/// Default inter-frame gap in byte times (IEEE 802.3 minimum of 96 bit times)
pub const DEFAULT_IFG: u8 = 12;

/// Time the ARP cache clear bit is held asserted, in microseconds
pub const ARP_CLEAR_HOLD_US: u32 = 10;
