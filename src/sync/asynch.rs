//! Async/await support.
//!
//! The interrupt side wraps its handler in [`WakingHandler`] and passes it to
//! [`SharedMac::on_interrupt`](super::SharedMac::on_interrupt). Each handled
//! condition records the outcome of that direction's transfer and wakes the
//! matching static waker. The completion futures consume the recorded
//! outcome, never the validity bit: hardware clears the bit before the
//! interrupt is serviced, so only the recorded outcome says whether the
//! transfer failed.
//!
//! ```ignore
//! static MAC: SharedMac<MmioRegisters> =
//!     SharedMac::new(EthMac::new(unsafe { MmioRegisters::at_default_base() }));
//!
//! #[interrupt]
//! fn ETH_MAC() {
//!     MAC.on_interrupt(WakingHandler::new(()));
//! }
//!
//! async fn tx_task() {
//!     MAC.send_async(TX_BUF_PHYS, 64, 1).await.ok();
//!     MAC.wait_tx_idle().await.ok();
//! }
//! ```

use core::future::poll_fn;
use core::task::Poll;

use super::primitives::{AtomicWaker, CriticalSectionCell};
use crate::driver::config::Direction;
use crate::driver::error::{IoError, IoResult};
use crate::driver::interrupt::{InterruptHandler, InterruptStatus};

/// Woken on RX done and RX error
pub static RX_WAKER: AtomicWaker = AtomicWaker::new();

/// Woken on TX done and TX error
pub static TX_WAKER: AtomicWaker = AtomicWaker::new();

/// Woken on any error condition
pub static ERR_WAKER: AtomicWaker = AtomicWaker::new();

/// Outcome of the last transfer per direction, not yet consumed
#[derive(Clone, Copy)]
struct Completions {
    rx: Option<IoResult<u32>>,
    tx: Option<IoResult<()>>,
}

impl Completions {
    const EMPTY: Self = Self { rx: None, tx: None };
}

static COMPLETIONS: CriticalSectionCell<Completions> = CriticalSectionCell::new(Completions::EMPTY);

/// Error conditions seen by [`WakingHandler`]
static LATCHED_ERRORS: CriticalSectionCell<InterruptStatus> =
    CriticalSectionCell::new(InterruptStatus::from_raw(0));

/// [`InterruptHandler`] adapter that wakes the async side.
///
/// The wrapped handler runs first; then the outcome is recorded and the
/// wakers are signalled.
pub struct WakingHandler<H> {
    inner: H,
}

impl<H: InterruptHandler> WakingHandler<H> {
    /// Wrap a handler; pass `()` when only the wakers are needed
    pub const fn new(inner: H) -> Self {
        Self { inner }
    }

    /// Unwrap the inner handler
    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<H: InterruptHandler> InterruptHandler for WakingHandler<H> {
    fn on_rx_done(&mut self, len: u32) {
        self.inner.on_rx_done(len);
        COMPLETIONS.with(|c| c.rx = Some(Ok(len)));
        RX_WAKER.wake();
    }

    fn on_tx_done(&mut self) {
        self.inner.on_tx_done();
        COMPLETIONS.with(|c| c.tx = Some(Ok(())));
        TX_WAKER.wake();
    }

    fn on_rx_error(&mut self) {
        self.inner.on_rx_error();
        COMPLETIONS.with(|c| c.rx = Some(Err(IoError::RxError)));
        LATCHED_ERRORS.with(|e| e.rx_error = true);
        ERR_WAKER.wake();
        RX_WAKER.wake();
    }

    fn on_tx_error(&mut self) {
        self.inner.on_tx_error();
        COMPLETIONS.with(|c| c.tx = Some(Err(IoError::TxError)));
        LATCHED_ERRORS.with(|e| e.tx_error = true);
        ERR_WAKER.wake();
        TX_WAKER.wake();
    }
}

/// Latched error conditions (not consumed)
pub fn latched_errors() -> InterruptStatus {
    LATCHED_ERRORS.with_ref(|e| *e)
}

/// Consume the recorded RX outcome: received length or error
pub(crate) fn take_rx_completion() -> Option<IoResult<u32>> {
    COMPLETIONS.with(|c| c.rx.take())
}

/// Consume the recorded TX outcome
pub(crate) fn take_tx_completion() -> Option<IoResult<()>> {
    COMPLETIONS.with(|c| c.tx.take())
}

/// Forget any outcome recorded for `direction` before a new submission
///
/// Must run in the same critical section as the submission, so an outcome
/// recorded afterwards always belongs to the new descriptor.
pub(crate) fn forget_completion(direction: Direction) {
    COMPLETIONS.with(|c| match direction {
        Direction::Rx => c.rx = None,
        Direction::Tx => c.tx = None,
    });
    LATCHED_ERRORS.with(|e| match direction {
        Direction::Rx => e.rx_error = false,
        Direction::Tx => e.tx_error = false,
    });
}

/// Wait until an error condition has been latched
///
/// Returns the latched errors without consuming them. A new async
/// submission in a direction clears that direction's latched error.
pub async fn wait_for_error() -> InterruptStatus {
    poll_fn(|cx| {
        let errors = latched_errors();
        if errors.has_error() {
            return Poll::Ready(errors);
        }
        ERR_WAKER.register(cx.waker());
        let errors = latched_errors();
        if errors.has_error() {
            Poll::Ready(errors)
        } else {
            Poll::Pending
        }
    })
    .await
}

/// Drop recorded outcomes and latched errors, then wake every waiting task
///
/// Call after re-initializing the MAC.
pub fn reset_async_state() {
    COMPLETIONS.with(|c| *c = Completions::EMPTY);
    LATCHED_ERRORS.with(|e| *e = InterruptStatus::default());
    RX_WAKER.wake();
    TX_WAKER.wake();
    ERR_WAKER.wake();
}
