//! Synchronization and async support
//!
//! - **Primitives** (`primitives`):
//!   - [`CriticalSectionCell`] - ISR-safe interior mutability
//!   - [`AtomicWaker`] - Waker storage filled by futures, drained by the ISR
//!
//! - **Shared wrapper** (`shared`):
//!   - [`SharedMac`] - [`EthMac`](crate::EthMac) behind a critical section,
//!     with async descriptor operations under the `async` feature
//!
//! - **Async support** (`asynch`):
//!   - [`WakingHandler`] - interrupt handler adapter that wakes futures
//!   - Static wakers and latched error state
//!
//! # Feature Flags
//!
//! - `critical-section`: Enables `primitives` and `shared`
//! - `async`: Enables `asynch` (implies `critical-section`)
//!
//! # Example
//!
//! ```ignore
//! use eth_mac_lite::sync::SharedMac;
//!
//! static MAC: SharedMac<MmioRegisters> =
//!     SharedMac::new(EthMac::new(unsafe { MmioRegisters::at_default_base() }));
//!
//! fn main() {
//!     MAC.with(|mac| mac.init(&MacConfig::default()));
//! }
//!
//! #[interrupt]
//! fn ETH_MAC() {
//!     MAC.on_interrupt(());
//! }
//! ```

mod primitives;

#[cfg(feature = "async")]
pub use primitives::AtomicWaker;
pub use primitives::CriticalSectionCell;

mod shared;

pub use shared::SharedMac;

#[cfg(feature = "async")]
pub mod asynch;

#[cfg(feature = "async")]
pub use asynch::{
    ERR_WAKER, RX_WAKER, TX_WAKER, WakingHandler, latched_errors, reset_async_state,
    wait_for_error,
};
