//! # Primitive Naming Configuration
//!
//! Loaded once at startup from TOML, then used as a factory so every
//! primitive a component creates carries the same `app` prefix.
//!
//! ```toml
//! app = "namigator"
//! named = true
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::condvar::ConditionVariable;
use crate::error::{SyncError, SyncResult};
use crate::host::ThreadingHost;
use crate::mutex::ExclusiveLock;
use crate::name::DebugName;
use crate::rwlock::SharedExclusiveLock;

/// Default application prefix for debug names.
pub const DEFAULT_APP: &str = "hostlock";

/// How primitives created through this config are named.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    /// Application prefix of every debug name.
    pub app: String,
    /// When `false`, primitives are created unnamed.
    pub named: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            app: DEFAULT_APP.to_owned(),
            named: true,
        }
    }
}

impl SyncConfig {
    /// Parses a config document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// [`SyncError::InvalidConfig`] on malformed TOML or unknown keys.
    pub fn from_toml_str(source: &str) -> SyncResult<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| SyncError::InvalidConfig(e.to_string()))?;
        tracing::debug!(app = %config.app, named = config.named, "sync config loaded");
        Ok(config)
    }

    /// Reads and parses a config file.
    ///
    /// # Errors
    ///
    /// [`SyncError::ConfigIo`] if the file cannot be read,
    /// [`SyncError::InvalidConfig`] if it cannot be parsed.
    pub fn from_toml_file(path: impl AsRef<Path>) -> SyncResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| SyncError::ConfigIo {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&source)
    }

    /// The debug name for `type_name[instance]`, or `None` when naming is off.
    #[must_use]
    pub fn debug_name<'a>(
        &'a self,
        type_name: &'a str,
        instance: Option<&'a str>,
    ) -> Option<DebugName<'a>> {
        self.named.then(|| DebugName::new(&self.app, type_name, instance))
    }

    /// Creates an [`ExclusiveLock`] named after this config.
    ///
    /// # Errors
    ///
    /// [`SyncError::CreationFailed`] if the host cannot allocate a mutex.
    pub fn exclusive_lock<H: ThreadingHost>(
        &self,
        type_name: &str,
        instance: Option<&str>,
    ) -> SyncResult<ExclusiveLock<H>> {
        match self.debug_name(type_name, instance) {
            Some(name) => ExclusiveLock::with_name(&name),
            None => ExclusiveLock::unnamed(),
        }
    }

    /// Creates a [`SharedExclusiveLock`] named after this config.
    ///
    /// # Errors
    ///
    /// [`SyncError::CreationFailed`] if the host cannot allocate a rwlock.
    pub fn shared_exclusive_lock<H: ThreadingHost>(
        &self,
        type_name: &str,
        instance: Option<&str>,
    ) -> SyncResult<SharedExclusiveLock<H>> {
        match self.debug_name(type_name, instance) {
            Some(name) => SharedExclusiveLock::with_name(&name),
            None => SharedExclusiveLock::unnamed(),
        }
    }

    /// Creates a [`ConditionVariable`] named after this config.
    ///
    /// # Errors
    ///
    /// [`SyncError::CreationFailed`] if the host cannot allocate a cond.
    pub fn condition_variable<H: ThreadingHost>(
        &self,
        type_name: &str,
        instance: Option<&str>,
    ) -> SyncResult<ConditionVariable<H>> {
        match self.debug_name(type_name, instance) {
            Some(name) => ConditionVariable::with_name(&name.to_string()),
            None => ConditionVariable::unnamed(),
        }
    }
}
