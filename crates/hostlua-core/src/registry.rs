//! Thread-safe handle registry for host objects
//!
//! The registry keeps every host object reachable from script space alive:
//! each proxy embeds a handle, and the entry behind that handle holds a
//! strong reference until the proxy is finalized.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use hostlua_sdk::HostRef;
use tracing::trace;

use crate::handle::Handle;

/// Registry mapping handles to strong host references.
///
/// Handles are auto-incrementing and start at 1. All operations take `&self`
/// and are safe to call concurrently from several threads. Map guards never
/// escape a call, so host code running under a lookup cannot deadlock the
/// registry.
pub struct HandleRegistry {
    map: DashMap<Handle, HostRef>,
    next_id: AtomicU64,
}

impl HandleRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            map: DashMap::new(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Insert a host reference and return its new handle.
    ///
    /// Registering the same object twice yields two independent handles.
    pub fn register(&self, obj: HostRef) -> Handle {
        let handle = Handle::from_raw(self.next_id.fetch_add(1, Ordering::Relaxed));
        trace!(%handle, class = obj.class().name(), "register host object");
        self.map.insert(handle, obj);
        handle
    }

    /// Resolve a handle to its host object.
    pub fn lookup(&self, handle: Handle) -> Option<HostRef> {
        self.map.get(&handle).map(|entry| HostRef::clone(entry.value()))
    }

    /// Remove an entry. Unknown or already released handles are ignored.
    ///
    /// Returns whether an entry was removed.
    pub fn release(&self, handle: Handle) -> bool {
        self.map.remove(&handle).is_some()
    }

    /// Check whether a handle has a live entry
    pub fn contains(&self, handle: Handle) -> bool {
        self.map.contains_key(&handle)
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if no entries are live
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Drop every entry. Handles stay unique; the counter is not reset.
    ///
    /// Entries are removed one at a time and each host object is dropped
    /// after its shard lock is released, so destructors may use the registry.
    pub fn clear(&self) {
        let handles: Vec<Handle> = self.map.iter().map(|entry| *entry.key()).collect();
        let mut dropped = 0usize;
        for handle in handles {
            if let Some((_, obj)) = self.map.remove(&handle) {
                drop(obj);
                dropped += 1;
            }
        }
        trace!(dropped, "registry cleared");
    }
}

impl Default for HandleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HandleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandleRegistry")
            .field("live", &self.map.len())
            .field("next_id", &self.next_id.load(Ordering::Relaxed))
            .finish()
    }
}
