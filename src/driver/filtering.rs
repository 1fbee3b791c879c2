//! Frame filter configuration.
//!
//! The filter configuration register holds nothing but the four policy
//! flags, so it is always written whole in a single write and never
//! read-modify-written.

use super::config::FilterConfig;
use super::mac::EthMac;
use crate::hal::bus::RegisterIo;
use crate::internal::register::FILTER_CONFIG_OFFSET;

impl<R: RegisterIo> EthMac<R> {
    /// Configure the frame filter from its four flags
    ///
    /// # Example
    /// ```ignore
    /// // Station address plus broadcast
    /// mac.configure_filter(true, false, true, false);
    /// ```
    pub fn configure_filter(
        &mut self,
        enable: bool,
        promiscuous: bool,
        broadcast: bool,
        multicast: bool,
    ) {
        self.set_filter(FilterConfig::new(enable, promiscuous, broadcast, multicast));
    }

    /// Apply a frame filter policy
    pub fn set_filter(&mut self, filter: FilterConfig) {
        self.regs.write(FILTER_CONFIG_OFFSET, filter.to_bits());
    }

    /// Read back the frame filter policy
    pub fn filter(&self) -> FilterConfig {
        FilterConfig::from_bits(self.regs.read(FILTER_CONFIG_OFFSET))
    }
}
