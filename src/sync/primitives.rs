//! Low-level primitives shared by [`SharedMac`](super::SharedMac) and the
//! async support.

use core::cell::RefCell;
#[cfg(feature = "async")]
use core::task::Waker;
use critical_section::Mutex;

/// `RefCell` behind a `critical_section::Mutex`.
///
/// Every access runs inside a critical section, so the same value can be
/// reached from thread mode and from an interrupt handler. `Sync` comes from
/// the mutex and therefore requires `T: Send`.
pub struct CriticalSectionCell<T> {
    inner: Mutex<RefCell<T>>,
}

impl<T> CriticalSectionCell<T> {
    /// Wrap a value (usable in `static` initializers)
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(value)),
        }
    }

    /// Run `f` with exclusive access inside a critical section
    ///
    /// # Panics
    ///
    /// Panics if called re-entrantly from within another `with` on the same
    /// cell. Use [`try_with`](Self::try_with) where that can happen.
    #[inline]
    pub fn with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        critical_section::with(|cs| f(&mut self.inner.borrow_ref_mut(cs)))
    }

    /// Like [`with`](Self::with) but returns `None` instead of panicking
    /// when the value is already borrowed
    #[inline]
    pub fn try_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        critical_section::with(|cs| {
            let mut guard = self.inner.borrow(cs).try_borrow_mut().ok()?;
            Some(f(&mut guard))
        })
    }

    /// Run `f` with shared access inside a critical section
    #[inline]
    pub fn with_ref<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        critical_section::with(|cs| f(&self.inner.borrow_ref(cs)))
    }
}

/// Single-waker slot filled by a future and drained by an interrupt handler
#[cfg(feature = "async")]
pub struct AtomicWaker {
    waker: CriticalSectionCell<Option<Waker>>,
}

#[cfg(feature = "async")]
impl AtomicWaker {
    /// Empty slot (usable in `static` initializers)
    pub const fn new() -> Self {
        Self {
            waker: CriticalSectionCell::new(None),
        }
    }

    /// Store `waker`, replacing any waker for a different task
    pub fn register(&self, waker: &Waker) {
        self.waker.with(|slot| match slot {
            Some(current) if current.will_wake(waker) => {}
            _ => *slot = Some(waker.clone()),
        });
    }

    /// Wake and forget the stored waker, if any
    #[inline]
    pub fn wake(&self) {
        // Wake outside the critical section
        if let Some(waker) = self.waker.with(Option::take) {
            waker.wake();
        }
    }

    /// Whether a waker is stored
    pub fn is_registered(&self) -> bool {
        self.waker.with_ref(Option::is_some)
    }
}

#[cfg(feature = "async")]
impl Default for AtomicWaker {
    fn default() -> Self {
        Self::new()
    }
}
