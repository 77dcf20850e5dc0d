//! Engine configuration

/// Limits applied to the Lua state
#[derive(Debug, Clone, Default)]
pub struct ResourceLimits {
    /// Maximum Lua heap size in bytes (None = unlimited)
    pub max_heap_bytes: Option<usize>,
}

impl ResourceLimits {
    /// Create unlimited resource limits
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Create resource limits with specific heap size
    pub fn with_heap_limit(max_heap_bytes: usize) -> Self {
        Self {
            max_heap_bytes: Some(max_heap_bytes),
        }
    }
}

/// Options for creating an `Engine`
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Resource limits
    pub limits: ResourceLimits,

    /// Chunk name used by `Engine::run`
    pub chunk_name: String,

    /// Drop every registry entry when the engine is dropped.
    ///
    /// Applies only to a registry the engine created itself; a registry
    /// passed to `Engine::with_registry` is never cleared.
    pub clear_registry_on_drop: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            limits: ResourceLimits::default(),
            chunk_name: "=script".to_string(),
            clear_registry_on_drop: true,
        }
    }
}
