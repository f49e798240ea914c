//! # HOSTLOCK Core
//!
//! Owning wrappers around a host runtime's native synchronization handles:
//! - [`ExclusiveLock`] - mutual exclusion (`lock` / `try_lock` / `unlock`)
//! - [`SharedExclusiveLock`] - reader/writer lock (shared and exclusive access)
//! - [`ConditionVariable`] - wait/notify paired with an [`ExclusiveLock`]
//!
//! ## Architecture Rules
//!
//! 1. **One owner per handle** - Wrappers are move-only; a handle is destroyed exactly once
//! 2. **No duplicated state** - Lock state lives in the native primitive only
//! 3. **Scoped acquisition** - [`ScopedLock`] and [`ScopedSharedLock`] release on every exit path
//! 4. **Fallible construction only** - Creation returns [`SyncResult`]; everything after is infallible
//!
//! The native facility is pluggable through [`ThreadingHost`]. The default
//! backend is [`ParkingLotHost`].
//!
//! ## Example
//!
//! ```rust
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use hostlock_core::{ConditionVariable, ExclusiveLock};
//!
//! # fn main() -> hostlock_core::SyncResult<()> {
//! let lock = ExclusiveLock::named("namigator", "tile_cache", Some("azeroth"))?;
//! let ready = ConditionVariable::named("namigator.tile_cache_ready")?;
//! let loaded = AtomicBool::new(true);
//!
//! let mut guard = lock.scoped();
//! ready.wait_until(&mut guard, || loaded.load(Ordering::Relaxed));
//! // Lock held and `loaded` observed true here.
//! drop(guard);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod condvar;
pub mod config;
pub mod error;
pub mod host;
pub mod lockable;
pub mod mutex;
pub mod name;
pub mod rwlock;

pub use condvar::ConditionVariable;
pub use config::SyncConfig;
pub use error::{SyncError, SyncResult};
pub use host::{ParkingLotHost, ThreadingHost};
pub use lockable::{Lockable, ScopedLock, ScopedSharedLock, SharedLockable};
pub use mutex::ExclusiveLock;
pub use name::{DebugName, PrimitiveKind};
pub use rwlock::SharedExclusiveLock;
