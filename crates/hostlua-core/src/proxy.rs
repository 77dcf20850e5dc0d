//! Proxy userdata
//!
//! A proxy is the script-side stand-in for a host object. It carries a handle
//! and nothing else the script can see. Its metamethods forward to the
//! capability table of the object's type, which is attached to every proxy
//! as its user value. Finalization happens in `Drop`, which the Lua collector
//! runs when the proxy becomes unreachable.

use std::sync::{Arc, Weak};

use mlua::{AnyUserData, Function, Lua, MetaMethod, Table, UserData, UserDataMethods, Value};

use crate::dispatch;
use crate::handle::Handle;
use crate::registry::HandleRegistry;
use crate::type_bridge::{INDEX_SLOT, NEWINDEX_SLOT, TOSTRING_SLOT};

/// Script-side reference to a registered host object
pub struct Proxy {
    handle: Handle,
    registry: Weak<HandleRegistry>,
}

impl Proxy {
    pub(crate) fn new(handle: Handle, registry: &Arc<HandleRegistry>) -> Self {
        Self {
            handle,
            registry: Arc::downgrade(registry),
        }
    }

    /// Embedded handle
    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub(crate) fn registry(&self) -> &Weak<HandleRegistry> {
        &self.registry
    }
}

impl Drop for Proxy {
    fn drop(&mut self) {
        dispatch::finalize(self);
    }
}

impl std::fmt::Debug for Proxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Proxy").field(&self.handle).finish()
    }
}

impl UserData for Proxy {
    fn add_methods<'lua, M: UserDataMethods<'lua, Self>>(methods: &mut M) {
        methods.add_meta_function(MetaMethod::Index, forward_index);
        methods.add_meta_function(MetaMethod::NewIndex, forward_newindex);
        methods.add_meta_function(MetaMethod::ToString, forward_tostring);
    }
}

/// Handle embedded in a userdata, if it is a live proxy
pub fn proxy_handle(value: &AnyUserData<'_>) -> Option<Handle> {
    value.borrow::<Proxy>().ok().map(|proxy| proxy.handle)
}

fn capability<'lua>(proxy: &AnyUserData<'lua>, slot: &str) -> mlua::Result<Function<'lua>> {
    let table: Table<'lua> = proxy.user_value()?;
    table.raw_get(slot)
}

fn forward_index<'lua>(
    _: &'lua Lua,
    (proxy, key): (AnyUserData<'lua>, Value<'lua>),
) -> mlua::Result<Value<'lua>> {
    capability(&proxy, INDEX_SLOT)?.call((proxy, key))
}

fn forward_newindex<'lua>(
    _: &'lua Lua,
    (proxy, key, value): (AnyUserData<'lua>, Value<'lua>, Value<'lua>),
) -> mlua::Result<()> {
    capability(&proxy, NEWINDEX_SLOT)?.call((proxy, key, value))
}

fn forward_tostring<'lua>(_: &'lua Lua, proxy: AnyUserData<'lua>) -> mlua::Result<String> {
    let text = capability(&proxy, TOSTRING_SLOT)
        .and_then(|slot| slot.call::<_, String>(proxy))
        .unwrap_or_else(|_| dispatch::NULL_TEXT.to_string());
    Ok(text)
}
