//! # Lockable Contracts and Scoped Acquisition
//!
//! [`Lockable`] and [`SharedLockable`] are the minimal raw-locking contracts
//! the wrappers satisfy. [`ScopedLock`] and [`ScopedSharedLock`] are the generic
//! scoped-acquisition utilities built on them: acquire on construction,
//! release in `Drop`, so every exit path (early return, `?`, panic unwind)
//! gives the lock back.
//!
//! ## Usage
//!
//! ```rust
//! use hostlock_core::{ExclusiveLock, ScopedLock};
//!
//! # fn main() -> hostlock_core::SyncResult<()> {
//! let lock = ExclusiveLock::new()?;
//! let contended = || {
//!     std::thread::scope(|s| s.spawn(|| ScopedLock::try_new(&lock).is_none()).join().unwrap())
//! };
//! {
//!     let _guard = ScopedLock::new(&lock);
//!     assert!(contended());
//! }
//! assert!(!contended());
//! # Ok(())
//! # }
//! ```

#![allow(unsafe_code)]

use std::fmt;
use std::marker::PhantomData;

/// A lock providing exclusive acquisition.
///
/// Locks are not reentrant: acquiring again from the thread that already
/// holds the lock is a caller error.
pub trait Lockable {
    /// Blocks until the lock is acquired.
    fn lock(&self);

    /// Acquires the lock if it is free. Never blocks.
    fn try_lock(&self) -> bool;

    /// Releases the lock.
    ///
    /// # Safety
    ///
    /// The calling thread must currently hold the lock.
    unsafe fn unlock(&self);
}

/// A lock that additionally provides shared acquisition.
///
/// A thread holding shared or exclusive access must not acquire either
/// again on the same lock. There is no upgrade path.
pub trait SharedLockable: Lockable {
    /// Blocks until a shared slot is acquired.
    fn lock_shared(&self);

    /// Acquires a shared slot if no exclusive holder is present. Never blocks.
    fn try_lock_shared(&self) -> bool;

    /// Releases a shared slot.
    ///
    /// # Safety
    ///
    /// The calling thread must currently hold shared access.
    unsafe fn unlock_shared(&self);
}

/// Exclusive acquisition of a [`Lockable`] for the lifetime of the guard.
///
/// Guards are `!Send`: the thread that acquired the lock releases it.
#[must_use = "if unused the lock is released immediately"]
pub struct ScopedLock<'a, L: Lockable + ?Sized> {
    lock: &'a L,
    _not_send: PhantomData<*const ()>,
}

impl<'a, L: Lockable + ?Sized> ScopedLock<'a, L> {
    /// Blocks until `lock` is acquired and returns the guard.
    #[inline]
    pub fn new(lock: &'a L) -> Self {
        lock.lock();
        Self {
            lock,
            _not_send: PhantomData,
        }
    }

    /// Acquires `lock` without blocking, or returns `None` if it is held.
    #[inline]
    pub fn try_new(lock: &'a L) -> Option<Self> {
        lock.try_lock().then(|| Self {
            lock,
            _not_send: PhantomData,
        })
    }

    /// Wraps a lock the calling thread already holds.
    ///
    /// # Safety
    ///
    /// The calling thread must hold `lock`, and nothing else may release it.
    #[inline]
    pub unsafe fn adopt(lock: &'a L) -> Self {
        Self {
            lock,
            _not_send: PhantomData,
        }
    }

    /// The lock this guard holds.
    #[inline]
    #[must_use]
    pub fn lockable(&self) -> &'a L {
        self.lock
    }

    /// Gives up the guard without unlocking and returns the still-held lock.
    ///
    /// The caller becomes responsible for calling [`Lockable::unlock`].
    #[inline]
    #[must_use = "the lock stays held; unlock it explicitly"]
    pub fn release(self) -> &'a L {
        let lock = self.lock;
        std::mem::forget(self);
        lock
    }
}

impl<L: Lockable + ?Sized> Drop for ScopedLock<'_, L> {
    #[inline]
    fn drop(&mut self) {
        // SAFETY: a live guard means this thread holds the lock.
        unsafe { self.lock.unlock() }
    }
}

impl<L: Lockable + ?Sized> fmt::Debug for ScopedLock<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedLock").finish_non_exhaustive()
    }
}

/// Shared acquisition of a [`SharedLockable`] for the lifetime of the guard.
#[must_use = "if unused the lock is released immediately"]
pub struct ScopedSharedLock<'a, L: SharedLockable + ?Sized> {
    lock: &'a L,
    _not_send: PhantomData<*const ()>,
}

impl<'a, L: SharedLockable + ?Sized> ScopedSharedLock<'a, L> {
    /// Blocks until a shared slot of `lock` is acquired.
    #[inline]
    pub fn new(lock: &'a L) -> Self {
        lock.lock_shared();
        Self {
            lock,
            _not_send: PhantomData,
        }
    }

    /// Acquires a shared slot without blocking, or `None` if a writer holds it.
    #[inline]
    pub fn try_new(lock: &'a L) -> Option<Self> {
        lock.try_lock_shared().then(|| Self {
            lock,
            _not_send: PhantomData,
        })
    }

    /// Wraps a shared slot the calling thread already holds.
    ///
    /// # Safety
    ///
    /// The calling thread must hold shared access to `lock`.
    #[inline]
    pub unsafe fn adopt(lock: &'a L) -> Self {
        Self {
            lock,
            _not_send: PhantomData,
        }
    }

    /// The lock this guard holds.
    #[inline]
    #[must_use]
    pub fn lockable(&self) -> &'a L {
        self.lock
    }
}

impl<L: SharedLockable + ?Sized> Drop for ScopedSharedLock<'_, L> {
    #[inline]
    fn drop(&mut self) {
        // SAFETY: a live guard means this thread holds a shared slot.
        unsafe { self.lock.unlock_shared() }
    }
}

impl<L: SharedLockable + ?Sized> fmt::Debug for ScopedSharedLock<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedSharedLock").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    /// Single-threaded bookkeeping lock, enough to observe guard behaviour.
    #[derive(Default)]
    struct Tracked {
        exclusive: Cell<bool>,
        shared: Cell<usize>,
    }

    impl Lockable for Tracked {
        fn lock(&self) {
            assert!(self.try_lock(), "would block");
        }

        fn try_lock(&self) -> bool {
            if self.exclusive.get() || self.shared.get() > 0 {
                return false;
            }
            self.exclusive.set(true);
            true
        }

        unsafe fn unlock(&self) {
            assert!(self.exclusive.replace(false), "unlock without holding");
        }
    }

    impl SharedLockable for Tracked {
        fn lock_shared(&self) {
            assert!(self.try_lock_shared(), "would block");
        }

        fn try_lock_shared(&self) -> bool {
            if self.exclusive.get() {
                return false;
            }
            self.shared.set(self.shared.get() + 1);
            true
        }

        unsafe fn unlock_shared(&self) {
            let held = self.shared.get();
            assert!(held > 0, "unlock_shared without holding");
            self.shared.set(held - 1);
        }
    }

    #[test]
    fn test_scoped_lock_releases_on_drop() {
        let lock = Tracked::default();
        {
            let _guard = ScopedLock::new(&lock);
            assert!(lock.exclusive.get());
        }
        assert!(!lock.exclusive.get());
    }

    #[test]
    fn test_try_new_fails_while_held() {
        let lock = Tracked::default();
        let guard = ScopedLock::new(&lock);
        assert!(ScopedLock::try_new(&lock).is_none());
        assert!(ScopedSharedLock::try_new(&lock).is_none());
        drop(guard);
        assert!(ScopedLock::try_new(&lock).is_some());
    }

    #[test]
    fn test_release_keeps_lock_held() {
        let lock = Tracked::default();
        let raw = ScopedLock::new(&lock).release();
        assert!(lock.exclusive.get());

        let readopted = unsafe { ScopedLock::adopt(raw) };
        drop(readopted);
        assert!(!lock.exclusive.get());
    }

    #[test]
    fn test_adopted_shared_slot_released_on_drop() {
        let lock = Tracked::default();
        assert!(lock.try_lock_shared());

        let adopted = unsafe { ScopedSharedLock::adopt(&lock) };
        assert!(std::ptr::eq(adopted.lockable(), &lock));
        assert_eq!(lock.shared.get(), 1);
        drop(adopted);
        assert_eq!(lock.shared.get(), 0);
        assert!(ScopedLock::try_new(&lock).is_some());
    }

    #[test]
    fn test_shared_guards_stack() {
        let lock = Tracked::default();
        let a = ScopedSharedLock::new(&lock);
        let b = ScopedSharedLock::new(&lock);
        assert_eq!(lock.shared.get(), 2);
        assert!(ScopedLock::try_new(&lock).is_none());
        drop(a);
        drop(b);
        assert_eq!(lock.shared.get(), 0);
        assert!(ScopedLock::try_new(&lock).is_some());
    }

    #[test]
    fn test_release_on_early_return() {
        fn fallible(lock: &Tracked, fail: bool) -> Result<(), &'static str> {
            let _guard = ScopedLock::new(lock);
            if fail {
                return Err("bail");
            }
            Ok(())
        }

        let lock = Tracked::default();
        assert!(fallible(&lock, true).is_err());
        assert!(!lock.exclusive.get());
        assert!(fallible(&lock, false).is_ok());
        assert!(!lock.exclusive.get());
    }
}
