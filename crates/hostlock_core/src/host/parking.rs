//! # parking_lot Backend
//!
//! Raw lock operations are built from the guard API: acquiring forgets the
//! guard, releasing force-unlocks. `cond_wait` rebuilds a guard over the
//! mutex the caller already holds; that guard never unlocks on drop or unwind.

#![allow(unsafe_code)]

use std::mem::{self, ManuallyDrop};

use parking_lot::{Condvar, Mutex, RwLock};

use super::ThreadingHost;

/// Default host, backed by `parking_lot`.
///
/// Creation never fails on this backend. Debug names are only recorded in
/// trace events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParkingLotHost;

impl ThreadingHost for ParkingLotHost {
    type Mutex = Mutex<()>;
    type RwLock = RwLock<()>;
    type Cond = Condvar;

    fn mutex_create(name: Option<&str>) -> Option<Self::Mutex> {
        tracing::trace!(name = name.unwrap_or(""), "mutex created");
        Some(Mutex::new(()))
    }

    fn mutex_destroy(_mutex: Self::Mutex) {
        tracing::trace!("mutex destroyed");
    }

    #[inline]
    fn mutex_lock(mutex: &Self::Mutex) {
        mem::forget(mutex.lock());
    }

    #[inline]
    fn mutex_try_lock(mutex: &Self::Mutex) -> bool {
        mutex.try_lock().map(mem::forget).is_some()
    }

    #[inline]
    unsafe fn mutex_unlock(mutex: &Self::Mutex) {
        // SAFETY: caller holds the mutex; its guard was forgotten on acquire.
        unsafe { mutex.force_unlock() }
    }

    fn rwlock_create(name: Option<&str>) -> Option<Self::RwLock> {
        tracing::trace!(name = name.unwrap_or(""), "rwlock created");
        Some(RwLock::new(()))
    }

    fn rwlock_destroy(_rwlock: Self::RwLock) {
        tracing::trace!("rwlock destroyed");
    }

    #[inline]
    fn rwlock_lock_shared(rwlock: &Self::RwLock) {
        mem::forget(rwlock.read());
    }

    #[inline]
    fn rwlock_try_lock_shared(rwlock: &Self::RwLock) -> bool {
        rwlock.try_read().map(mem::forget).is_some()
    }

    #[inline]
    unsafe fn rwlock_unlock_shared(rwlock: &Self::RwLock) {
        // SAFETY: caller holds a shared slot whose guard was forgotten.
        unsafe { rwlock.force_unlock_read() }
    }

    #[inline]
    fn rwlock_lock_exclusive(rwlock: &Self::RwLock) {
        mem::forget(rwlock.write());
    }

    #[inline]
    fn rwlock_try_lock_exclusive(rwlock: &Self::RwLock) -> bool {
        rwlock.try_write().map(mem::forget).is_some()
    }

    #[inline]
    unsafe fn rwlock_unlock_exclusive(rwlock: &Self::RwLock) {
        // SAFETY: caller holds exclusive access whose guard was forgotten.
        unsafe { rwlock.force_unlock_write() }
    }

    fn cond_create(name: Option<&str>) -> Option<Self::Cond> {
        tracing::trace!(name = name.unwrap_or(""), "cond created");
        Some(Condvar::new())
    }

    fn cond_destroy(_cond: Self::Cond) {
        tracing::trace!("cond destroyed");
    }

    #[inline]
    fn cond_notify_one(cond: &Self::Cond) {
        let _ = cond.notify_one();
    }

    #[inline]
    fn cond_notify_all(cond: &Self::Cond) {
        let _ = cond.notify_all();
    }

    unsafe fn cond_wait(cond: &Self::Cond, mutex: &Self::Mutex) {
        // SAFETY: caller holds the mutex, so a guard over it is accurate.
        // The acquisition stays the caller's: the guard is never dropped,
        // including when `wait` panics on a second mutex with the mutex held.
        let mut guard = ManuallyDrop::new(unsafe { mutex.make_guard_unchecked() });
        cond.wait(&mut *guard);
    }
}
