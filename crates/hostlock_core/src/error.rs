//! # Synchronization Error Types
//!
//! Only construction can fail. Once a primitive exists, every lock, unlock,
//! wait and notify operation is infallible.

use thiserror::Error;

use crate::name::PrimitiveKind;

/// Errors that can occur while creating primitives or loading their config.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// The host runtime could not allocate the native primitive.
    #[error("failed to create {kind}")]
    CreationFailed {
        /// Which primitive was being created.
        kind: PrimitiveKind,
        /// Debug name requested for it, if any.
        name: Option<String>,
    },

    /// A configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A configuration file could not be read.
    #[error("failed to read configuration {path}: {reason}")]
    ConfigIo {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error message.
        reason: String,
    },
}

impl SyncError {
    /// Builds a [`SyncError::CreationFailed`] and logs it.
    pub(crate) fn creation_failed(kind: PrimitiveKind, name: Option<&str>) -> Self {
        tracing::warn!(%kind, name = name.unwrap_or(""), "native primitive creation failed");
        Self::CreationFailed {
            kind,
            name: name.map(str::to_owned),
        }
    }
}

/// Result type for primitive construction.
pub type SyncResult<T> = Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creation_message_matches_kind() {
        let err = SyncError::creation_failed(PrimitiveKind::RwLock, None);
        assert_eq!(err.to_string(), "failed to create rwlock");
    }

    #[test]
    fn test_creation_keeps_requested_name() {
        let err = SyncError::creation_failed(PrimitiveKind::Cond, Some("app.ready"));
        assert_eq!(
            err,
            SyncError::CreationFailed {
                kind: PrimitiveKind::Cond,
                name: Some("app.ready".to_owned()),
            }
        );
    }
}
