//! Hardware Abstraction Layer
//!
//! This module isolates the driver from how the register file is reached.
//!
//! # Modules
//!
//! - [`bus`]: The [`RegisterIo`] access seam and the memory-mapped backend
//!
//! # Delay Integration
//!
//! Operations that must hold a control bit for a fixed time take an
//! `embedded_hal::delay::DelayNs` directly. Pass any delay implementation
//! from your HAL.

pub mod bus;

// Re-export commonly used types
pub use bus::{MmioRegisters, RegisterIo};
