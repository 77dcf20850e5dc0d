//! Script engine: one Lua state plus the bridge serving it.
//!
//! # Example
//!
//! ```rust,ignore
//! use hostlua_runtime::Engine;
//!
//! let engine = Engine::new()?;
//! engine.register_global("obj", Arc::new(Settings::default()))?;
//! engine.run("obj.Value = obj.Value + 1")?;
//! ```

use std::path::Path;
use std::sync::Arc;

use hostlua_core::{proxy_handle, Bridge, Handle, HandleRegistry};
use hostlua_sdk::{HostRef, HostType, HostValue};
use mlua::{Lua, Value};
use tracing::{debug, instrument};

use crate::error::RuntimeError;
use crate::options::EngineOptions;

/// A Lua state with host objects bridged into it
pub struct Engine {
    lua: Lua,
    bridge: Bridge,
    options: EngineOptions,
    owns_registry: bool,
}

impl Engine {
    /// Create an engine with default options and its own registry.
    pub fn new() -> Result<Self, RuntimeError> {
        Self::with_options(EngineOptions::default())
    }

    /// Create an engine with the given options and its own registry.
    pub fn with_options(options: EngineOptions) -> Result<Self, RuntimeError> {
        let mut engine = Self::with_registry(options, Arc::new(HandleRegistry::new()))?;
        engine.owns_registry = true;
        Ok(engine)
    }

    /// Create an engine over an existing registry.
    ///
    /// The caller owns the registry: dropping the engine never clears it. The
    /// engine's own proxies are released when its Lua state closes, so
    /// entries belonging to other engines are untouched.
    pub fn with_registry(
        options: EngineOptions,
        registry: Arc<HandleRegistry>,
    ) -> Result<Self, RuntimeError> {
        let lua = Lua::new();
        if let Some(limit) = options.limits.max_heap_bytes {
            lua.set_memory_limit(limit)?;
        }
        let bridge = Bridge::install(&lua, registry);
        debug!(
            chunk = %options.chunk_name,
            max_heap_bytes = ?options.limits.max_heap_bytes,
            "engine created"
        );
        Ok(Self {
            lua,
            bridge,
            options,
            owns_registry: false,
        })
    }

    /// Expose a host object to scripts under a global name.
    pub fn register_global(&self, name: &str, obj: HostRef) -> Result<Handle, RuntimeError> {
        let proxy = self.bridge.create_proxy(&self.lua, obj)?;
        let handle = proxy_handle(&proxy).unwrap_or(Handle::NONE);
        self.lua.globals().set(name, proxy)?;
        debug!(name, %handle, "registered global");
        Ok(handle)
    }

    /// Run script text under the configured chunk name.
    pub fn run(&self, script: &str) -> Result<(), RuntimeError> {
        self.run_named(script, &self.options.chunk_name)
    }

    /// Run script text under an explicit chunk name.
    #[instrument(skip(self, script), err)]
    pub fn run_named(&self, script: &str, chunk_name: &str) -> Result<(), RuntimeError> {
        self.lua
            .load(script)
            .set_name(chunk_name)
            .exec()
            .map_err(RuntimeError::script)
    }

    /// Load and run a script file; the path becomes the chunk name.
    pub fn run_file(&self, path: impl AsRef<Path>) -> Result<(), RuntimeError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        self.run_named(&source, &format!("@{}", path.display()))
    }

    /// Evaluate an expression and convert its value for the host.
    ///
    /// Numbers come back as `f64`, proxies as the original host object.
    #[instrument(skip(self), err)]
    pub fn eval(&self, expr: &str) -> Result<HostValue, RuntimeError> {
        let value: Value<'_> = self
            .lua
            .load(expr)
            .set_name(&self.options.chunk_name)
            .eval()
            .map_err(RuntimeError::script)?;
        Ok(self.bridge.pop_value(&value, &HostType::Any)?)
    }

    /// Run a full collection cycle, finalizing unreachable proxies.
    pub fn collect_garbage(&self) -> Result<(), RuntimeError> {
        self.lua.gc_collect()?;
        Ok(())
    }

    /// Registry backing this engine
    pub fn registry(&self) -> &Arc<HandleRegistry> {
        self.bridge.registry()
    }

    /// Number of live registry entries
    pub fn live_handles(&self) -> usize {
        self.bridge.registry().len()
    }

    /// Underlying Lua state
    pub fn lua(&self) -> &Lua {
        &self.lua
    }

    /// Options the engine was created with
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        if self.owns_registry && self.options.clear_registry_on_drop {
            self.bridge.registry().clear();
        }
        debug!(live = self.bridge.registry().len(), "engine dropped");
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("registry", self.bridge.registry())
            .field("options", &self.options)
            .field("owns_registry", &self.owns_registry)
            .finish()
    }
}
