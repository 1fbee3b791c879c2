//! ISR-safe driver wrapper.

use super::primitives::CriticalSectionCell;
use crate::driver::interrupt::{InterruptHandler, InterruptStatus};
use crate::driver::mac::EthMac;
use crate::hal::bus::RegisterIo;

/// [`EthMac`] behind a critical section.
///
/// Thread-mode code and the interrupt handler both go through this wrapper,
/// so control-register read-modify-write sequences, descriptor submissions
/// and interrupt dispatch never interleave.
///
/// # Example
///
/// ```ignore
/// static MAC: SharedMac<MmioRegisters> =
///     SharedMac::new(EthMac::new(unsafe { MmioRegisters::at_default_base() }));
///
/// fn main() {
///     MAC.with(|mac| mac.init(&MacConfig::default()));
///     MAC.with(|mac| mac.send(TX_BUF_PHYS, 64, 1)).ok();
/// }
///
/// #[interrupt]
/// fn ETH_MAC() {
///     MAC.on_interrupt(());
/// }
/// ```
pub struct SharedMac<R: RegisterIo> {
    inner: CriticalSectionCell<EthMac<R>>,
}

impl<R: RegisterIo> SharedMac<R> {
    /// Wrap a driver (usable in `static` initializers)
    pub const fn new(mac: EthMac<R>) -> Self {
        Self {
            inner: CriticalSectionCell::new(mac),
        }
    }

    /// Run `f` with exclusive access to the driver
    ///
    /// Interrupts are disabled for the duration of the closure.
    #[inline]
    pub fn with<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&mut EthMac<R>) -> T,
    {
        self.inner.with(f)
    }

    /// Like [`with`](Self::with), returning `None` if the driver is already
    /// borrowed (for example from a nested call in the same context)
    #[inline]
    pub fn try_with<T, F>(&self, f: F) -> Option<T>
    where
        F: FnOnce(&mut EthMac<R>) -> T,
    {
        self.inner.try_with(f)
    }

    /// Run [`EthMac::isr`] inside a critical section
    ///
    /// Call from the peripheral's interrupt handler.
    #[inline]
    pub fn on_interrupt<H: InterruptHandler>(&self, handler: H) -> InterruptStatus {
        self.inner.with(|mac| mac.isr(handler))
    }
}

#[cfg(feature = "async")]
mod asynch_ops {
    use core::future::poll_fn;
    use core::task::Poll;

    use super::SharedMac;
    use crate::driver::config::Direction;
    use crate::driver::error::{DmaError, DmaResult, IoResult};
    use crate::driver::mac::EthMac;
    use crate::hal::bus::RegisterIo;
    use crate::sync::asynch::{
        RX_WAKER, TX_WAKER, forget_completion, take_rx_completion, take_tx_completion,
    };
    use crate::sync::primitives::AtomicWaker;

    impl<R: RegisterIo> SharedMac<R> {
        /// Submit a TX descriptor, waiting for the slot to become free
        ///
        /// Requires the interrupt handler to run a
        /// [`WakingHandler`](crate::sync::asynch::WakingHandler). Any
        /// unconsumed TX outcome from an earlier transfer is discarded.
        pub async fn send_async(&self, buffer_addr: u32, length: u32, tag: u8) -> DmaResult<()> {
            self.submit_async(Direction::Tx, |mac| mac.send(buffer_addr, length, tag))
                .await
        }

        /// Arm the RX descriptor, waiting for the slot to become free
        pub async fn receive_async(
            &self,
            buffer_addr: u32,
            max_length: u32,
            tag: u8,
        ) -> DmaResult<()> {
            self.submit_async(Direction::Rx, |mac| mac.receive(buffer_addr, max_length, tag))
                .await
        }

        /// Wait for the interrupt that completes the TX descriptor
        ///
        /// Resolves on the TX done or TX error condition handled by
        /// [`WakingHandler`], not on the validity bit, so a failure is always
        /// reported for the transfer it belongs to. Pair with
        /// [`send_async`](Self::send_async).
        ///
        /// # Errors
        ///
        /// [`IoError::TxError`](crate::IoError::TxError) if hardware reported
        /// a transmit error for the transfer.
        pub async fn wait_tx_idle(&self) -> IoResult<()> {
            wait_completion(&TX_WAKER, take_tx_completion).await
        }

        /// Wait for the interrupt that completes the RX descriptor and return
        /// the received length
        ///
        /// Pends until a frame lands; with no descriptor armed it does not
        /// resolve. Pair with [`receive_async`](Self::receive_async).
        ///
        /// # Errors
        ///
        /// [`IoError::RxError`](crate::IoError::RxError) if hardware reported
        /// a receive error for the transfer.
        pub async fn wait_rx_idle(&self) -> IoResult<u32> {
            wait_completion(&RX_WAKER, take_rx_completion).await
        }

        async fn submit_async<F>(&self, direction: Direction, mut submit: F) -> DmaResult<()>
        where
            F: FnMut(&mut EthMac<R>) -> DmaResult<()>,
        {
            let waker = match direction {
                Direction::Rx => &RX_WAKER,
                Direction::Tx => &TX_WAKER,
            };
            // Submission and forgetting the old outcome share one critical
            // section, so the ISR cannot record between them.
            let mut attempt = || {
                self.with(|mac| {
                    let result = submit(mac);
                    if result.is_ok() {
                        forget_completion(direction);
                    }
                    result
                })
            };
            poll_fn(|cx| {
                match attempt() {
                    Err(DmaError::Busy) => {}
                    done => return Poll::Ready(done),
                }
                waker.register(cx.waker());
                // Slot may have been released before the waker was stored
                match attempt() {
                    Err(DmaError::Busy) => Poll::Pending,
                    done => Poll::Ready(done),
                }
            })
            .await
        }
    }

    async fn wait_completion<T>(
        waker: &AtomicWaker,
        take: fn() -> Option<IoResult<T>>,
    ) -> IoResult<T> {
        poll_fn(|cx| {
            if let Some(outcome) = take() {
                return Poll::Ready(outcome);
            }
            waker.register(cx.waker());
            match take() {
                Some(outcome) => Poll::Ready(outcome),
                None => Poll::Pending,
            }
        })
        .await
    }
}
