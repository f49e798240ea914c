//! # Shared/Exclusive Lock
//!
//! Owning wrapper over a host reader/writer lock handle.
//!
//! ## Thread Safety
//!
//! - Shared access: any number of holders while no writer is present
//! - Exclusive access: exactly one holder, no readers
//! - Enforcement is entirely the host primitive's; the wrapper keeps no counts

#![allow(unsafe_code)]

use std::fmt;
use std::mem::ManuallyDrop;

use crate::error::{SyncError, SyncResult};
use crate::host::{ParkingLotHost, ThreadingHost};
use crate::lockable::{Lockable, ScopedLock, ScopedSharedLock, SharedLockable};
use crate::name::{DebugName, PrimitiveKind};

/// A reader/writer lock backed by the host's native rwlock.
///
/// Implements [`Lockable`] (exclusive access) and [`SharedLockable`]
/// (shared access). Neither acquisition is reentrant and shared access
/// cannot be upgraded.
///
/// # Example
///
/// ```rust
/// use hostlock_core::SharedExclusiveLock;
///
/// # fn main() -> hostlock_core::SyncResult<()> {
/// let lock = SharedExclusiveLock::named("namigator", "tiles", Some("0"))?;
/// let read = lock.scoped_shared();
/// std::thread::scope(|s| {
///     s.spawn(|| assert!(lock.try_scoped_shared().is_some()));
///     s.spawn(|| assert!(lock.try_scoped().is_none()));
/// });
/// drop(read);
/// assert!(lock.try_scoped().is_some());
/// # Ok(())
/// # }
/// ```
pub struct SharedExclusiveLock<H: ThreadingHost = ParkingLotHost> {
    handle: ManuallyDrop<H::RwLock>,
}

impl SharedExclusiveLock<ParkingLotHost> {
    /// Creates an unnamed lock on the default host.
    ///
    /// # Errors
    ///
    /// [`SyncError::CreationFailed`] if the host cannot allocate a rwlock.
    #[inline]
    pub fn new() -> SyncResult<Self> {
        Self::unnamed()
    }

    /// Creates a lock on the default host named `app.type_name[instance]`.
    ///
    /// # Errors
    ///
    /// [`SyncError::CreationFailed`] if the host cannot allocate a rwlock.
    #[inline]
    pub fn named(app: &str, type_name: &str, instance: Option<&str>) -> SyncResult<Self> {
        Self::with_name(&DebugName::new(app, type_name, instance))
    }
}

impl<H: ThreadingHost> SharedExclusiveLock<H> {
    /// Creates an unnamed lock on host `H`.
    ///
    /// # Errors
    ///
    /// [`SyncError::CreationFailed`] if the host cannot allocate a rwlock.
    pub fn unnamed() -> SyncResult<Self> {
        Self::create(None)
    }

    /// Creates a lock on host `H` with the given debug name.
    ///
    /// # Errors
    ///
    /// [`SyncError::CreationFailed`] if the host cannot allocate a rwlock.
    pub fn with_name(name: &DebugName<'_>) -> SyncResult<Self> {
        Self::create(Some(&name.to_string()))
    }

    fn create(name: Option<&str>) -> SyncResult<Self> {
        H::rwlock_create(name)
            .map(Self::from_raw)
            .ok_or_else(|| SyncError::creation_failed(PrimitiveKind::RwLock, name))
    }

    /// Adopts an already-created handle. The wrapper becomes its sole owner.
    #[inline]
    #[must_use]
    pub fn from_raw(handle: H::RwLock) -> Self {
        Self {
            handle: ManuallyDrop::new(handle),
        }
    }

    /// Releases ownership of the handle to the caller without destroying it.
    #[inline]
    #[must_use = "the handle is leaked unless destroyed or re-adopted"]
    pub fn into_raw(self) -> H::RwLock {
        let mut this = ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so the handle is taken exactly once.
        unsafe { ManuallyDrop::take(&mut this.handle) }
    }

    /// Borrows the handle. Ownership stays with this wrapper.
    #[inline]
    #[must_use]
    pub fn as_raw(&self) -> &H::RwLock {
        &self.handle
    }

    /// Blocks until a shared (read) slot is acquired.
    #[inline]
    pub fn lock_shared(&self) {
        H::rwlock_lock_shared(&self.handle);
    }

    /// Acquires a shared slot if no writer holds the lock. Never blocks.
    #[inline]
    #[must_use]
    pub fn try_lock_shared(&self) -> bool {
        H::rwlock_try_lock_shared(&self.handle)
    }

    /// Releases a shared slot.
    ///
    /// # Safety
    ///
    /// The calling thread must currently hold shared access.
    #[inline]
    pub unsafe fn unlock_shared(&self) {
        // SAFETY: forwarded caller contract.
        unsafe { H::rwlock_unlock_shared(&self.handle) }
    }

    /// Blocks until exclusive (write) access is acquired.
    #[inline]
    pub fn lock(&self) {
        H::rwlock_lock_exclusive(&self.handle);
    }

    /// Acquires exclusive access if there are no holders at all. Never blocks.
    #[inline]
    #[must_use]
    pub fn try_lock(&self) -> bool {
        H::rwlock_try_lock_exclusive(&self.handle)
    }

    /// Releases exclusive access.
    ///
    /// # Safety
    ///
    /// The calling thread must currently hold exclusive access.
    #[inline]
    pub unsafe fn unlock(&self) {
        // SAFETY: forwarded caller contract.
        unsafe { H::rwlock_unlock_exclusive(&self.handle) }
    }

    /// Exclusive guard, blocking.
    #[inline]
    pub fn scoped(&self) -> ScopedLock<'_, Self> {
        ScopedLock::new(self)
    }

    /// Exclusive guard, non-blocking.
    #[inline]
    pub fn try_scoped(&self) -> Option<ScopedLock<'_, Self>> {
        ScopedLock::try_new(self)
    }

    /// Shared guard, blocking.
    #[inline]
    pub fn scoped_shared(&self) -> ScopedSharedLock<'_, Self> {
        ScopedSharedLock::new(self)
    }

    /// Shared guard, non-blocking.
    #[inline]
    pub fn try_scoped_shared(&self) -> Option<ScopedSharedLock<'_, Self>> {
        ScopedSharedLock::try_new(self)
    }
}

impl<H: ThreadingHost> Lockable for SharedExclusiveLock<H> {
    #[inline]
    fn lock(&self) {
        SharedExclusiveLock::lock(self);
    }

    #[inline]
    fn try_lock(&self) -> bool {
        SharedExclusiveLock::try_lock(self)
    }

    #[inline]
    unsafe fn unlock(&self) {
        // SAFETY: forwarded caller contract.
        unsafe { SharedExclusiveLock::unlock(self) }
    }
}

impl<H: ThreadingHost> SharedLockable for SharedExclusiveLock<H> {
    #[inline]
    fn lock_shared(&self) {
        SharedExclusiveLock::lock_shared(self);
    }

    #[inline]
    fn try_lock_shared(&self) -> bool {
        SharedExclusiveLock::try_lock_shared(self)
    }

    #[inline]
    unsafe fn unlock_shared(&self) {
        // SAFETY: forwarded caller contract.
        unsafe { SharedExclusiveLock::unlock_shared(self) }
    }
}

impl<H: ThreadingHost> Drop for SharedExclusiveLock<H> {
    fn drop(&mut self) {
        // SAFETY: drop runs once and `handle` is not touched afterwards.
        let handle = unsafe { ManuallyDrop::take(&mut self.handle) };
        H::rwlock_destroy(handle);
    }
}

impl<H: ThreadingHost> fmt::Debug for SharedExclusiveLock<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedExclusiveLock").finish_non_exhaustive()
    }
}
