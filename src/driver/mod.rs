//! Core driver components for the Ethernet MAC peripheral.
//!
//! - [`config`] - Configuration types and builder patterns
//! - [`error`] - Error types and result aliases
//! - [`mac`] - The [`EthMac`] driver, station configuration and control plane
//! - [`filtering`] - Frame filter policy
//! - [`descriptor`] - Single-slot TX/RX descriptor engine
//! - [`interrupt`] - Interrupt status parsing and dispatch
//!
//! # Example
//!
//! ```ignore
//! use eth_mac_lite::driver::{EthMac, MacConfig, DmaError};
//!
//! let config = MacConfig::new()
//!     .with_mac_address([0x02, 0x00, 0x00, 0x00, 0x00, 0x01]);
//! ```

// Submodules
pub mod config;
pub mod descriptor;
pub mod error;
pub mod filtering;
pub mod interrupt;
pub mod mac;

// Re-exports for convenience
pub use config::{Direction, FilterConfig, LinkSpeed, MacConfig, SlotState};
pub use error::{ConfigError, ConfigResult, DmaError, DmaResult, Error, IoError, IoResult, Result};
pub use interrupt::{InterruptHandler, InterruptStatus};
pub use mac::EthMac;
