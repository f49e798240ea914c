//! # Threading Host Capability
//!
//! The narrow interface between the wrappers and whatever native threading
//! facility backs them.
//!
//! ```text
//!   ExclusiveLock<H>        SharedExclusiveLock<H>      ConditionVariable<H>
//!         │                          │                          │
//!         ▼                          ▼                          ▼
//!   H::Mutex handle           H::RwLock handle            H::Cond handle
//!         │                          │                          │
//!         └──────────────────────────┼──────────────────────────┘
//!                                    ▼
//!                      ThreadingHost (create / destroy /
//!                      lock / unlock / wait / notify)
//! ```
//!
//! A host is a static capability: no instance is carried around, only the
//! associated handle types and the functions that act on them. Handle
//! creation may fail; every other operation is assumed infallible.
//!
//! Acquisition order among blocked contexts is whatever the host provides.
//! No fairness is part of this contract.

#![allow(unsafe_code)]

mod parking;

pub use parking::ParkingLotHost;

/// Native primitive factory and operations provided by the host runtime.
///
/// # Safety contract for implementors
///
/// - `*_lock` / `*_try_lock` must provide the usual acquire semantics:
///   a successful acquire happens-after the previous release.
/// - `cond_wait` must release `mutex` atomically with respect to
///   `cond_notify_*`, block, and hold `mutex` again on return.
///   Returning without a notification (a spurious wakeup) is allowed.
/// - `cond_wait` may panic when concurrent waiters on one `cond` use
///   different mutexes. `mutex` must still be held while that panic unwinds.
/// - `*_destroy` is called at most once per handle, on an unlocked handle.
pub trait ThreadingHost: 'static {
    /// Native mutual-exclusion handle.
    type Mutex: Send + Sync;
    /// Native reader/writer lock handle.
    type RwLock: Send + Sync;
    /// Native condition-variable handle.
    type Cond: Send + Sync;

    /// Allocates a mutex. `None` means the host is out of resources.
    fn mutex_create(name: Option<&str>) -> Option<Self::Mutex>;

    /// Releases a mutex handle.
    fn mutex_destroy(mutex: Self::Mutex);

    /// Blocks until `mutex` is acquired. Not reentrant.
    fn mutex_lock(mutex: &Self::Mutex);

    /// Acquires `mutex` if it is free, without blocking.
    fn mutex_try_lock(mutex: &Self::Mutex) -> bool;

    /// Releases `mutex`.
    ///
    /// # Safety
    ///
    /// The calling thread must currently hold `mutex`.
    unsafe fn mutex_unlock(mutex: &Self::Mutex);

    /// Allocates a reader/writer lock. `None` means the host is out of resources.
    fn rwlock_create(name: Option<&str>) -> Option<Self::RwLock>;

    /// Releases a reader/writer lock handle.
    fn rwlock_destroy(rwlock: Self::RwLock);

    /// Blocks until a shared slot of `rwlock` is acquired.
    fn rwlock_lock_shared(rwlock: &Self::RwLock);

    /// Acquires a shared slot of `rwlock` without blocking.
    fn rwlock_try_lock_shared(rwlock: &Self::RwLock) -> bool;

    /// Releases a shared slot.
    ///
    /// # Safety
    ///
    /// The calling thread must currently hold shared access to `rwlock`.
    unsafe fn rwlock_unlock_shared(rwlock: &Self::RwLock);

    /// Blocks until exclusive access to `rwlock` is acquired.
    fn rwlock_lock_exclusive(rwlock: &Self::RwLock);

    /// Acquires exclusive access to `rwlock` without blocking.
    fn rwlock_try_lock_exclusive(rwlock: &Self::RwLock) -> bool;

    /// Releases exclusive access.
    ///
    /// # Safety
    ///
    /// The calling thread must currently hold exclusive access to `rwlock`.
    unsafe fn rwlock_unlock_exclusive(rwlock: &Self::RwLock);

    /// Allocates a condition variable. `None` means the host is out of resources.
    fn cond_create(name: Option<&str>) -> Option<Self::Cond>;

    /// Releases a condition-variable handle.
    fn cond_destroy(cond: Self::Cond);

    /// Wakes at most one thread blocked in [`ThreadingHost::cond_wait`] on `cond`.
    fn cond_notify_one(cond: &Self::Cond);

    /// Wakes every thread blocked in [`ThreadingHost::cond_wait`] on `cond`.
    fn cond_notify_all(cond: &Self::Cond);

    /// Atomically releases `mutex`, blocks on `cond`, then reacquires `mutex`.
    ///
    /// # Safety
    ///
    /// The calling thread must currently hold `mutex`.
    unsafe fn cond_wait(cond: &Self::Cond, mutex: &Self::Mutex);
}
