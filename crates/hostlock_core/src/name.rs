//! # Debug Naming
//!
//! Identifiers handed to the host when a primitive is created. They are
//! diagnostic metadata only: nothing reads them back and locking never
//! depends on them.

use std::fmt;

/// The kind of native primitive a handle refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Mutual-exclusion lock.
    Mutex,
    /// Reader/writer lock.
    RwLock,
    /// Condition variable.
    Cond,
}

impl PrimitiveKind {
    /// Short lowercase name, as used in error messages.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mutex => "mutex",
            Self::RwLock => "rwlock",
            Self::Cond => "cond",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Debug identifier for a lock, rendered as `app.type` or `app.type[instance]`.
///
/// # Example
///
/// ```rust
/// use hostlock_core::DebugName;
///
/// let name = DebugName::new("namigator", "tile_cache", Some("kalimdor"));
/// assert_eq!(name.to_string(), "namigator.tile_cache[kalimdor]");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DebugName<'a> {
    /// Component or application identifier.
    pub app: &'a str,
    /// Logical role of the primitive.
    pub type_name: &'a str,
    /// Optional disambiguator between instances of the same role.
    pub instance: Option<&'a str>,
}

impl<'a> DebugName<'a> {
    /// Creates a debug name from its three parts.
    #[inline]
    #[must_use]
    pub const fn new(app: &'a str, type_name: &'a str, instance: Option<&'a str>) -> Self {
        Self { app, type_name, instance }
    }
}

impl fmt::Display for DebugName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.app, self.type_name)?;
        if let Some(instance) = self.instance {
            write!(f, "[{instance}]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_without_instance() {
        let name = DebugName::new("namigator", "map", None);
        assert_eq!(name.to_string(), "namigator.map");
    }

    #[test]
    fn test_name_with_instance() {
        let name = DebugName::new("namigator", "map", Some("0"));
        assert_eq!(name.to_string(), "namigator.map[0]");
    }

    #[test]
    fn test_empty_instance_keeps_brackets() {
        let name = DebugName::new("a", "b", Some(""));
        assert_eq!(name.to_string(), "a.b[]");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(PrimitiveKind::Mutex.to_string(), "mutex");
        assert_eq!(PrimitiveKind::RwLock.to_string(), "rwlock");
        assert_eq!(PrimitiveKind::Cond.to_string(), "cond");
    }
}
