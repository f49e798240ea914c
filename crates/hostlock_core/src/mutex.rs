//! # Exclusive Lock
//!
//! Owning wrapper over a host mutex handle.

#![allow(unsafe_code)]

use std::fmt;
use std::mem::ManuallyDrop;

use crate::error::{SyncError, SyncResult};
use crate::host::{ParkingLotHost, ThreadingHost};
use crate::lockable::{Lockable, ScopedLock};
use crate::name::{DebugName, PrimitiveKind};

/// A mutually exclusive lock backed by the host's native mutex.
///
/// Implements [`Lockable`], so it composes with [`ScopedLock`] and
/// [`ConditionVariable`](crate::ConditionVariable).
///
/// The wrapper owns its handle: it is destroyed exactly once when the
/// wrapper is dropped, unless [`ExclusiveLock::into_raw`] moved it out first.
/// Dropping a locked `ExclusiveLock` is a caller error; the wrapper does not
/// unlock on drop.
///
/// # Example
///
/// ```rust
/// use hostlock_core::ExclusiveLock;
///
/// # fn main() -> hostlock_core::SyncResult<()> {
/// let lock = ExclusiveLock::named("namigator", "map", None)?;
/// let guard = lock.scoped();
/// assert!(!std::thread::scope(|s| s.spawn(|| lock.try_lock()).join().unwrap()));
/// drop(guard);
/// # Ok(())
/// # }
/// ```
pub struct ExclusiveLock<H: ThreadingHost = ParkingLotHost> {
    handle: ManuallyDrop<H::Mutex>,
}

impl ExclusiveLock<ParkingLotHost> {
    /// Creates an unnamed lock on the default host.
    ///
    /// # Errors
    ///
    /// [`SyncError::CreationFailed`] if the host cannot allocate a mutex.
    #[inline]
    pub fn new() -> SyncResult<Self> {
        Self::unnamed()
    }

    /// Creates a lock on the default host named `app.type_name[instance]`.
    ///
    /// # Errors
    ///
    /// [`SyncError::CreationFailed`] if the host cannot allocate a mutex.
    #[inline]
    pub fn named(app: &str, type_name: &str, instance: Option<&str>) -> SyncResult<Self> {
        Self::with_name(&DebugName::new(app, type_name, instance))
    }
}

impl<H: ThreadingHost> ExclusiveLock<H> {
    /// Creates an unnamed lock on host `H`.
    ///
    /// # Errors
    ///
    /// [`SyncError::CreationFailed`] if the host cannot allocate a mutex.
    pub fn unnamed() -> SyncResult<Self> {
        Self::create(None)
    }

    /// Creates a lock on host `H` with the given debug name.
    ///
    /// # Errors
    ///
    /// [`SyncError::CreationFailed`] if the host cannot allocate a mutex.
    pub fn with_name(name: &DebugName<'_>) -> SyncResult<Self> {
        Self::create(Some(&name.to_string()))
    }

    fn create(name: Option<&str>) -> SyncResult<Self> {
        H::mutex_create(name)
            .map(Self::from_raw)
            .ok_or_else(|| SyncError::creation_failed(PrimitiveKind::Mutex, name))
    }

    /// Adopts an already-created handle. The wrapper becomes its sole owner.
    #[inline]
    #[must_use]
    pub fn from_raw(handle: H::Mutex) -> Self {
        Self {
            handle: ManuallyDrop::new(handle),
        }
    }

    /// Releases ownership of the handle to the caller.
    ///
    /// The wrapper is consumed without destroying the handle; the caller
    /// must eventually pass it to [`ThreadingHost::mutex_destroy`] (or back
    /// to [`ExclusiveLock::from_raw`]).
    #[inline]
    #[must_use = "the handle is leaked unless destroyed or re-adopted"]
    pub fn into_raw(self) -> H::Mutex {
        let mut this = ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so the handle is taken exactly once.
        unsafe { ManuallyDrop::take(&mut this.handle) }
    }

    /// Borrows the handle. Ownership stays with this wrapper.
    #[inline]
    #[must_use]
    pub fn as_raw(&self) -> &H::Mutex {
        &self.handle
    }

    /// Blocks the calling thread until the lock is acquired.
    ///
    /// A thread that holds the lock must not lock it again.
    #[inline]
    pub fn lock(&self) {
        H::mutex_lock(&self.handle);
    }

    /// Acquires the lock if it is free. Never blocks.
    #[inline]
    #[must_use]
    pub fn try_lock(&self) -> bool {
        H::mutex_try_lock(&self.handle)
    }

    /// Releases the lock.
    ///
    /// # Safety
    ///
    /// The calling thread must currently hold the lock.
    #[inline]
    pub unsafe fn unlock(&self) {
        // SAFETY: forwarded caller contract.
        unsafe { H::mutex_unlock(&self.handle) }
    }

    /// Blocks until acquired and returns a guard that unlocks on drop.
    #[inline]
    pub fn scoped(&self) -> ScopedLock<'_, Self> {
        ScopedLock::new(self)
    }

    /// Acquires without blocking, returning a guard on success.
    #[inline]
    pub fn try_scoped(&self) -> Option<ScopedLock<'_, Self>> {
        ScopedLock::try_new(self)
    }
}

impl<H: ThreadingHost> Lockable for ExclusiveLock<H> {
    #[inline]
    fn lock(&self) {
        ExclusiveLock::lock(self);
    }

    #[inline]
    fn try_lock(&self) -> bool {
        ExclusiveLock::try_lock(self)
    }

    #[inline]
    unsafe fn unlock(&self) {
        // SAFETY: forwarded caller contract.
        unsafe { ExclusiveLock::unlock(self) }
    }
}

impl<H: ThreadingHost> Drop for ExclusiveLock<H> {
    fn drop(&mut self) {
        // SAFETY: drop runs once and `handle` is not touched afterwards.
        let handle = unsafe { ManuallyDrop::take(&mut self.handle) };
        H::mutex_destroy(handle);
    }
}

impl<H: ThreadingHost> fmt::Debug for ExclusiveLock<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExclusiveLock").finish_non_exhaustive()
    }
}
