//! # Condition Variable
//!
//! Lets threads block until a condition over state protected by an
//! [`ExclusiveLock`] becomes true.
//!
//! ## Waiting State Machine
//!
//! ```text
//!   Running ──wait(guard)──► Blocked ──notify / spurious──► Reacquiring ──► Running
//!      ▲                  (lock released                  (lock taken
//!      │                    atomically)                     again)
//!      └──────────────────────────────────────────────────────────┘
//! ```
//!
//! [`ConditionVariable::wait`] may come back with the condition still false.
//! [`ConditionVariable::wait_until`] re-checks under the lock and only
//! returns once the predicate holds.

#![allow(unsafe_code)]

use std::fmt;
use std::mem::ManuallyDrop;

use crate::error::{SyncError, SyncResult};
use crate::host::{ParkingLotHost, ThreadingHost};
use crate::lockable::ScopedLock;
use crate::mutex::ExclusiveLock;
use crate::name::PrimitiveKind;

/// A condition variable backed by the host's native cond handle.
///
/// Must be used together with an [`ExclusiveLock`] from the same host. All
/// threads waiting on one condition variable at the same time must use the
/// same lock.
///
/// # Example
///
/// ```rust
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::thread;
/// use hostlock_core::{ConditionVariable, ExclusiveLock};
///
/// # fn main() -> hostlock_core::SyncResult<()> {
/// let lock = ExclusiveLock::new()?;
/// let cond = ConditionVariable::new()?;
/// let ready = AtomicBool::new(false);
///
/// thread::scope(|s| {
///     s.spawn(|| {
///         let _guard = lock.scoped();
///         ready.store(true, Ordering::Relaxed);
///         cond.notify_one();
///     });
///
///     let mut guard = lock.scoped();
///     cond.wait_until(&mut guard, || ready.load(Ordering::Relaxed));
///     assert!(ready.load(Ordering::Relaxed));
/// });
/// # Ok(())
/// # }
/// ```
pub struct ConditionVariable<H: ThreadingHost = ParkingLotHost> {
    handle: ManuallyDrop<H::Cond>,
}

impl ConditionVariable<ParkingLotHost> {
    /// Creates an unnamed condition variable on the default host.
    ///
    /// # Errors
    ///
    /// [`SyncError::CreationFailed`] if the host cannot allocate a cond.
    #[inline]
    pub fn new() -> SyncResult<Self> {
        Self::unnamed()
    }

    /// Creates a condition variable on the default host.
    ///
    /// `name` identifies it for diagnostics only.
    ///
    /// # Errors
    ///
    /// [`SyncError::CreationFailed`] if the host cannot allocate a cond.
    #[inline]
    pub fn named(name: &str) -> SyncResult<Self> {
        Self::with_name(name)
    }
}

impl<H: ThreadingHost> ConditionVariable<H> {
    /// Creates an unnamed condition variable on host `H`.
    ///
    /// # Errors
    ///
    /// [`SyncError::CreationFailed`] if the host cannot allocate a cond.
    pub fn unnamed() -> SyncResult<Self> {
        Self::create(None)
    }

    /// Creates a condition variable on host `H` with a debug name.
    ///
    /// # Errors
    ///
    /// [`SyncError::CreationFailed`] if the host cannot allocate a cond.
    pub fn with_name(name: &str) -> SyncResult<Self> {
        Self::create(Some(name))
    }

    fn create(name: Option<&str>) -> SyncResult<Self> {
        H::cond_create(name)
            .map(Self::from_raw)
            .ok_or_else(|| SyncError::creation_failed(PrimitiveKind::Cond, name))
    }

    /// Adopts an already-created handle. The wrapper becomes its sole owner.
    #[inline]
    #[must_use]
    pub fn from_raw(handle: H::Cond) -> Self {
        Self {
            handle: ManuallyDrop::new(handle),
        }
    }

    /// Releases ownership of the handle to the caller without destroying it.
    #[inline]
    #[must_use = "the handle is leaked unless destroyed or re-adopted"]
    pub fn into_raw(self) -> H::Cond {
        let mut this = ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so the handle is taken exactly once.
        unsafe { ManuallyDrop::take(&mut this.handle) }
    }

    /// Borrows the handle. Ownership stays with this wrapper.
    #[inline]
    #[must_use]
    pub fn as_raw(&self) -> &H::Cond {
        &self.handle
    }

    /// Wakes all threads blocked on this condition variable, if any.
    #[inline]
    pub fn notify_all(&self) {
        H::cond_notify_all(&self.handle);
    }

    /// Wakes at most one thread blocked on this condition variable.
    ///
    /// Which waiter wakes is up to the host.
    #[inline]
    pub fn notify_one(&self) {
        H::cond_notify_one(&self.handle);
    }

    /// Prefer [`ConditionVariable::wait_until`].
    ///
    /// Releases the lock held by `guard`, blocks until woken, and reacquires
    /// the lock before returning. This can return without any notification;
    /// the caller must re-check its condition and wait again if needed.
    ///
    /// # Panics
    ///
    /// May panic if another thread is waiting on this condition variable
    /// with a different lock. The lock is still held by `guard` when the
    /// panic unwinds, so the guard releases it exactly once.
    #[inline]
    pub fn wait(&self, guard: &mut ScopedLock<'_, ExclusiveLock<H>>) {
        let mutex = guard.lockable().as_raw();
        // SAFETY: the guard proves this thread holds `mutex`, and the
        // exclusive borrow keeps it from being released meanwhile. A host
        // that rejects a mixed-lock wait panics with `mutex` still held.
        unsafe { H::cond_wait(&self.handle, mutex) }
    }

    /// Blocks until `predicate` returns `true`.
    ///
    /// The predicate is always evaluated with the lock held, before the
    /// first wait and after every wakeup. On return the lock is held and
    /// the predicate's last evaluation was `true`.
    ///
    /// # Panics
    ///
    /// Same as [`ConditionVariable::wait`].
    pub fn wait_until<F>(&self, guard: &mut ScopedLock<'_, ExclusiveLock<H>>, mut predicate: F)
    where
        F: FnMut() -> bool,
    {
        while !predicate() {
            self.wait(guard);
        }
    }
}

impl<H: ThreadingHost> Drop for ConditionVariable<H> {
    fn drop(&mut self) {
        // SAFETY: drop runs once and `handle` is not touched afterwards.
        let handle = unsafe { ManuallyDrop::take(&mut self.handle) };
        H::cond_destroy(handle);
    }
}

impl<H: ThreadingHost> fmt::Debug for ConditionVariable<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConditionVariable").finish_non_exhaustive()
    }
}
