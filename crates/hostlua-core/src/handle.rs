//! Opaque handles for registered host objects

use std::fmt;

/// Identifier of a registry entry.
///
/// Handles are allocated from a monotonically increasing counter and never
/// recycled. `Handle::NONE` is never allocated and marks a proxy without a
/// host object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u64);

impl Handle {
    /// The absent handle
    pub const NONE: Handle = Handle(0);

    /// Wrap a raw counter value
    pub const fn from_raw(raw: u64) -> Self {
        Handle(raw)
    }

    /// Raw counter value
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    /// Check for the absent handle
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
