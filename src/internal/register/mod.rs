//! Memory-mapped register definitions for the Ethernet MAC
//!
//! Offsets are relative to the peripheral base address. Every register is
//! 32 bits wide. All raw access goes through [`read_reg`] / [`write_reg`],
//! which are volatile so the compiler never reorders or elides a bus access.
//!
//! Register map:
//!
//! | Offset      | Register                     | Access        |
//! |-------------|------------------------------|---------------|
//! | 0x00        | Control                      | R/W           |
//! | 0x04        | Status (link speed)          | R             |
//! | 0x08 / 0x0C | MAC address low / high       | W             |
//! | 0x10        | Local IP                     | W             |
//! | 0x14        | Gateway IP                   | W             |
//! | 0x18        | Netmask                      | W             |
//! | 0x1C        | Filter configuration         | W             |
//! | 0x20        | IRQ enable                   | W             |
//! | 0x24        | IRQ status                   | R, W1C        |
//! | 0x28        | Inter-frame gap              | W             |
//! | 0x30..0x3C  | RX descriptor                | R/W           |
//! | 0x40..0x4C  | TX descriptor                | R/W           |

// =============================================================================
// Register Offsets
// =============================================================================

/// Control register offset
pub const CTRL_OFFSET: usize = 0x00;
/// Status register offset
pub const STATUS_OFFSET: usize = 0x04;
/// MAC address low word (bytes 0..=3)
pub const MAC_ADDR_LOW_OFFSET: usize = 0x08;
/// MAC address high word (bytes 4..=5)
pub const MAC_ADDR_HIGH_OFFSET: usize = 0x0C;
/// Local IP address register offset
pub const LOCAL_IP_OFFSET: usize = 0x10;
/// Gateway IP address register offset
pub const GATEWAY_IP_OFFSET: usize = 0x14;
/// Subnet mask register offset
pub const NETMASK_OFFSET: usize = 0x18;
/// Frame filter configuration register offset
pub const FILTER_CONFIG_OFFSET: usize = 0x1C;
/// Interrupt enable register offset
pub const IRQ_ENABLE_OFFSET: usize = 0x20;
/// Interrupt status register offset (write-1-to-clear)
pub const IRQ_STATUS_OFFSET: usize = 0x24;
/// Inter-frame gap register offset
pub const IFG_CONFIG_OFFSET: usize = 0x28;

/// RX descriptor buffer address
pub const RX_DESC_ADDR_OFFSET: usize = 0x30;
/// RX descriptor length (max length on submit, received length on completion)
pub const RX_DESC_LEN_OFFSET: usize = 0x34;
/// RX descriptor tag
pub const RX_DESC_TAG_OFFSET: usize = 0x38;
/// RX descriptor validity flag
pub const RX_DESC_VALID_OFFSET: usize = 0x3C;

/// TX descriptor buffer address
pub const TX_DESC_ADDR_OFFSET: usize = 0x40;
/// TX descriptor length
pub const TX_DESC_LEN_OFFSET: usize = 0x44;
/// TX descriptor tag
pub const TX_DESC_TAG_OFFSET: usize = 0x48;
/// TX descriptor validity flag
pub const TX_DESC_VALID_OFFSET: usize = 0x4C;

// =============================================================================
// Control Register (CTRL @ 0x00)
// =============================================================================

/// MAC transmitter enable
pub const CTRL_TX_EN: u32 = 1 << 0;
/// MAC receiver enable
pub const CTRL_RX_EN: u32 = 1 << 1;
/// RX DMA enable
pub const CTRL_DMA_RX_EN: u32 = 1 << 2;
/// TX DMA enable
pub const CTRL_DMA_TX_EN: u32 = 1 << 3;
/// ARP cache clear request
pub const CTRL_CLEAR_ARP: u32 = 1 << 4;

// =============================================================================
// Status Register (STATUS @ 0x04)
// =============================================================================

/// Link speed field mask (bits 1:0)
pub const STATUS_SPEED_MASK: u32 = 0x3;
/// Link speed encoding: 10 Mbps
pub const STATUS_SPEED_10M: u32 = 0;
/// Link speed encoding: 100 Mbps
pub const STATUS_SPEED_100M: u32 = 1;
/// Link speed encoding: 1000 Mbps
pub const STATUS_SPEED_1000M: u32 = 2;

// =============================================================================
// Filter Configuration (FILTER_CONFIG @ 0x1C)
// =============================================================================

/// Frame filter enable
pub const FILTER_ENABLE: u32 = 1 << 0;
/// Promiscuous mode (accept all frames)
pub const FILTER_PROMISCUOUS: u32 = 1 << 1;
/// Accept broadcast frames
pub const FILTER_BROADCAST: u32 = 1 << 2;
/// Accept multicast frames
pub const FILTER_MULTICAST: u32 = 1 << 3;

// =============================================================================
// Interrupt Status (IRQ_STATUS @ 0x24)
// =============================================================================

/// RX descriptor completed
pub const IRQ_RX_DONE: u32 = 1 << 0;
/// TX descriptor completed
pub const IRQ_TX_DONE: u32 = 1 << 1;
/// Receive error
pub const IRQ_RX_ERROR: u32 = 1 << 2;
/// Transmit error
pub const IRQ_TX_ERROR: u32 = 1 << 3;
/// All defined interrupt condition bits
pub const IRQ_ALL: u32 = IRQ_RX_DONE | IRQ_TX_DONE | IRQ_RX_ERROR | IRQ_TX_ERROR;

/// Value written to the IRQ enable register to let the peripheral assert its line
pub const IRQ_ENABLE_ON: u32 = 1;

// =============================================================================
// Descriptor Registers
// =============================================================================

/// Validity (ownership) bit in the descriptor valid registers
pub const DESC_VALID: u32 = 1 << 0;
/// Received length field mask in RX_DESC_LEN (bits 19:0)
pub const RX_LEN_MASK: u32 = 0x000F_FFFF;

// =============================================================================
// Raw Access
// =============================================================================

/// Read a 32-bit register at the given address
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn read_reg(addr: usize) -> u32 {
    unsafe { core::ptr::read_volatile(addr as *const u32) }
}

/// Write a 32-bit value to a register at the given address
///
/// # Safety
/// The caller must ensure the address is valid and properly aligned.
#[inline(always)]
pub unsafe fn write_reg(addr: usize, value: u32) {
    unsafe { core::ptr::write_volatile(addr as *mut u32, value) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_blocks_are_symmetric() {
        assert_eq!(
            TX_DESC_ADDR_OFFSET - RX_DESC_ADDR_OFFSET,
            TX_DESC_VALID_OFFSET - RX_DESC_VALID_OFFSET
        );
        assert_eq!(RX_DESC_VALID_OFFSET - RX_DESC_ADDR_OFFSET, 0x0C);
        assert_eq!(TX_DESC_VALID_OFFSET - TX_DESC_ADDR_OFFSET, 0x0C);
    }

    #[test]
    fn control_bits_are_distinct() {
        let bits = [CTRL_TX_EN, CTRL_RX_EN, CTRL_DMA_RX_EN, CTRL_DMA_TX_EN, CTRL_CLEAR_ARP];
        let combined = bits.iter().fold(0u32, |acc, b| acc | b);
        assert_eq!(combined.count_ones() as usize, bits.len());
    }

    #[test]
    fn irq_all_covers_four_conditions() {
        assert_eq!(IRQ_ALL, 0b1111);
    }

    #[test]
    fn volatile_helpers_round_trip_on_host_memory() {
        let mut cell: u32 = 0;
        let addr = &mut cell as *mut u32 as usize;
        // SAFETY: `addr` points at a live, aligned u32 on the stack.
        unsafe {
            write_reg(addr, 0xDEAD_BEEF);
            assert_eq!(read_reg(addr), 0xDEAD_BEEF);
        }
    }
}
