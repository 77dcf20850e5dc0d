//! Per-Lua-state bridge state
//!
//! `Bridge` is stored as app data of the Lua state it serves. Callbacks reach
//! the registry through it instead of through a global, so several engines
//! can run side by side with separate (or deliberately shared) registries.

use std::sync::Arc;

use hostlua_sdk::{HostRef, HostType, HostValue};
use mlua::{AnyUserData, Lua, Table, Value};
use tracing::debug;

use crate::error::{BridgeError, BridgeResult};
use crate::handle::Handle;
use crate::marshal::{self, MarshalError};
use crate::proxy::Proxy;
use crate::registry::HandleRegistry;
use crate::type_bridge::TypeBridge;

/// Registry and type bridge serving one Lua state
#[derive(Clone, Debug)]
pub struct Bridge {
    registry: Arc<HandleRegistry>,
    types: Arc<TypeBridge>,
}

impl Bridge {
    /// Bridge over an existing registry with a fresh type bridge
    pub fn new(registry: Arc<HandleRegistry>) -> Self {
        Self {
            registry,
            types: Arc::new(TypeBridge::new()),
        }
    }

    /// Create a bridge and store it in the Lua state's app data.
    ///
    /// Installing again replaces the previous bridge.
    pub fn install(lua: &Lua, registry: Arc<HandleRegistry>) -> Self {
        let bridge = Self::new(registry);
        if lua.set_app_data(bridge.clone()).is_some() {
            debug!("replaced bridge state");
        }
        bridge
    }

    /// The bridge installed in this Lua state
    pub fn from_lua(lua: &Lua) -> BridgeResult<Self> {
        lua.app_data_ref::<Bridge>()
            .map(|bridge| Bridge::clone(&bridge))
            .ok_or(BridgeError::NotInstalled)
    }

    /// Handle registry
    pub fn registry(&self) -> &Arc<HandleRegistry> {
        &self.registry
    }

    /// Type bridge
    pub fn types(&self) -> &Arc<TypeBridge> {
        &self.types
    }

    /// Register a host object without creating a proxy
    pub fn register(&self, obj: HostRef) -> Handle {
        self.registry.register(obj)
    }

    /// Release a handle
    pub fn release(&self, handle: Handle) -> bool {
        self.registry.release(handle)
    }

    /// Capability table for the object's type, installed on demand
    pub fn ensure_capabilities<'lua>(
        &self,
        lua: &'lua Lua,
        obj: &HostRef,
    ) -> BridgeResult<Table<'lua>> {
        Ok(self.types.ensure_capabilities(lua, obj.class())?)
    }

    /// Register a host object and wrap it in a new proxy
    pub fn create_proxy<'lua>(
        &self,
        lua: &'lua Lua,
        obj: HostRef,
    ) -> BridgeResult<AnyUserData<'lua>> {
        let capabilities = self.ensure_capabilities(lua, &obj)?;
        let handle = self.registry.register(obj);
        // A failed allocation drops the proxy, which releases the handle.
        let proxy = lua.create_userdata(Proxy::new(handle, &self.registry))?;
        proxy.set_user_value(capabilities)?;
        Ok(proxy)
    }

    /// Convert a host value into a Lua value
    pub fn push_value<'lua>(&self, lua: &'lua Lua, value: HostValue) -> BridgeResult<Value<'lua>> {
        marshal::push_value(self, lua, value)
    }

    /// Convert a Lua value into a host value of the declared type
    pub fn pop_value(
        &self,
        value: &Value<'_>,
        target: &HostType,
    ) -> Result<HostValue, MarshalError> {
        marshal::pop_value(self, value, target)
    }
}
