//! Capability callbacks and method dispatch
//!
//! Member resolution order is property, then field, then method group. Reads
//! of unknown members yield nil and writes to unknown or read-only members
//! are ignored; only method calls treat a missing target as an error.
//!
//! Overloads are chosen by arity first, then by trying each candidate in
//! declaration order and taking the first whose arguments all convert.

use std::panic::{catch_unwind, AssertUnwindSafe};

use hostlua_sdk::{catch_panic, HostRef, HostType, HostValue, MethodInfo};
use mlua::{AnyUserData, Function, Lua, MultiValue, Value, Variadic};
use tracing::{debug, trace};

use crate::bridge::Bridge;
use crate::error::{BridgeError, BridgeResult};
use crate::handle::Handle;
use crate::marshal::MarshalError;
use crate::proxy::{proxy_handle, Proxy};

/// Text of a proxy without a host object
pub const NULL_TEXT: &str = "null";
/// Text of a proxy whose handle no longer resolves
pub const INVALID_TEXT: &str = "invalid object";

pub(crate) fn index_slot<'lua>(
    lua: &'lua Lua,
    (proxy, key): (AnyUserData<'lua>, Value<'lua>),
) -> mlua::Result<Value<'lua>> {
    Ok(member_read(lua, &proxy, &key)?)
}

pub(crate) fn newindex_slot<'lua>(
    lua: &'lua Lua,
    (proxy, key, value): (AnyUserData<'lua>, Value<'lua>, Value<'lua>),
) -> mlua::Result<()> {
    Ok(member_write(lua, &proxy, &key, &value)?)
}

pub(crate) fn tostring_slot<'lua>(
    lua: &'lua Lua,
    proxy: AnyUserData<'lua>,
) -> mlua::Result<String> {
    Ok(to_text(lua, &proxy))
}

fn member_name(key: &Value<'_>) -> Option<String> {
    match key {
        Value::String(s) => {
            let name = s.to_str().ok()?;
            (!name.is_empty()).then(|| name.to_string())
        }
        _ => None,
    }
}

fn resolve(bridge: &Bridge, proxy: &AnyUserData<'_>) -> Option<(Handle, HostRef)> {
    let handle = proxy_handle(proxy).filter(|h| !h.is_none())?;
    let target = bridge.registry().lookup(handle)?;
    Some((handle, target))
}

/// Read member `key` of the proxied object.
///
/// Unknown members, empty keys and dead handles read as nil.
pub fn member_read<'lua>(
    lua: &'lua Lua,
    proxy: &AnyUserData<'lua>,
    key: &Value<'lua>,
) -> BridgeResult<Value<'lua>> {
    let Some(name) = member_name(key) else {
        return Ok(Value::Nil);
    };
    let bridge = Bridge::from_lua(lua)?;
    let Some((handle, target)) = resolve(&bridge, proxy) else {
        return Ok(Value::Nil);
    };
    let class = target.class();

    if let Some(read) = class.property(&name).and_then(|p| p.read(&*target)) {
        let value = read.map_err(|source| BridgeError::Read { member: name, source })?;
        return bridge.push_value(lua, value);
    }
    if let Some(field) = class.field(&name) {
        let value = field
            .read(&*target)
            .map_err(|source| BridgeError::Read { member: name, source })?;
        return bridge.push_value(lua, value);
    }
    if class.has_method(&name) {
        return Ok(Value::Function(bound_method(lua, handle, name)?));
    }

    trace!(member = %name, class = class.name(), "read of unknown member");
    Ok(Value::Nil)
}

/// Assign `value` to member `key` of the proxied object.
///
/// Only settable properties and non-readonly fields are candidates; anything
/// else is silently ignored.
pub fn member_write<'lua>(
    lua: &'lua Lua,
    proxy: &AnyUserData<'lua>,
    key: &Value<'lua>,
    value: &Value<'lua>,
) -> BridgeResult<()> {
    let Some(name) = member_name(key) else {
        return Ok(());
    };
    let bridge = Bridge::from_lua(lua)?;
    let Some((_, target)) = resolve(&bridge, proxy) else {
        return Ok(());
    };
    let class = target.class();

    if let Some(property) = class.property(&name).filter(|p| p.is_writable()) {
        let converted = assignable(&bridge, value, property.ty(), &name)?;
        if let Some(written) = property.write(&*target, converted) {
            written.map_err(|source| BridgeError::Write { member: name, source })?;
        }
        return Ok(());
    }
    if let Some(field) = class.field(&name).filter(|f| !f.is_readonly()) {
        let converted = assignable(&bridge, value, field.ty(), &name)?;
        if let Some(written) = field.write(&*target, converted) {
            written.map_err(|source| BridgeError::Write { member: name, source })?;
        }
        return Ok(());
    }

    trace!(member = %name, class = class.name(), "ignored write to unknown or read-only member");
    Ok(())
}

fn assignable(
    bridge: &Bridge,
    value: &Value<'_>,
    ty: &HostType,
    member: &str,
) -> BridgeResult<HostValue> {
    let converted = bridge.pop_value(value, ty).and_then(|v| {
        if v.is_null() && !ty.accepts_null() {
            Err(MarshalError::NullNotAllowed { target: ty.to_string() })
        } else {
            Ok(v)
        }
    });
    converted.map_err(|source| BridgeError::Marshal {
        member: member.to_string(),
        source,
    })
}

/// Textual form of the proxied object. Never fails.
pub fn to_text(lua: &Lua, proxy: &AnyUserData<'_>) -> String {
    let Some(handle) = proxy_handle(proxy).filter(|h| !h.is_none()) else {
        return NULL_TEXT.to_string();
    };
    let Some(target) = Bridge::from_lua(lua).ok().and_then(|b| b.registry().lookup(handle)) else {
        return INVALID_TEXT.to_string();
    };
    match catch_panic(|| Ok(target.to_display())) {
        Ok(text) if !text.is_empty() => text,
        _ => NULL_TEXT.to_string(),
    }
}

/// Release the proxy's handle. Never fails and never raises.
pub fn finalize(proxy: &Proxy) {
    let handle = proxy.handle();
    if handle.is_none() {
        return;
    }
    if let Some(registry) = proxy.registry().upgrade() {
        // Dropping the entry may run host destructors; a panic there must
        // not unwind into the collector.
        let _ = catch_unwind(AssertUnwindSafe(|| registry.release(handle)));
    }
}

/// Lua function that calls method group `name` on the object behind `handle`
pub fn bound_method<'lua>(
    lua: &'lua Lua,
    handle: Handle,
    name: String,
) -> mlua::Result<Function<'lua>> {
    lua.create_function(move |lua, args| call_method(lua, handle, &name, args))
}

/// Call method group `name` on the object behind `handle`.
///
/// The first argument is the receiver from `obj:Name(...)` and is dropped.
pub fn call_method<'lua>(
    lua: &'lua Lua,
    handle: Handle,
    name: &str,
    args: Variadic<Value<'lua>>,
) -> mlua::Result<MultiValue<'lua>> {
    Ok(dispatch_call(lua, handle, name, &args)?)
}

fn dispatch_call<'lua>(
    lua: &'lua Lua,
    handle: Handle,
    name: &str,
    args: &[Value<'lua>],
) -> BridgeResult<MultiValue<'lua>> {
    let bridge = Bridge::from_lua(lua)?;
    let target = bridge
        .registry()
        .lookup(handle)
        .ok_or(BridgeError::InvalidObject)?;
    let class = target.class();
    if !class.has_method(name) {
        return Err(BridgeError::MemberNotFound {
            class: class.name().to_string(),
            member: name.to_string(),
        });
    }

    let args = args.get(1..).unwrap_or_default();
    let Some((method, converted)) = select_overload(&bridge, class.methods_named(name), args) else {
        debug!(member = name, class = class.name(), arity = args.len(), "no admissible overload");
        return Err(BridgeError::NoOverload {
            member: name.to_string(),
            arity: args.len(),
        });
    };
    trace!(?method, %handle, "invoke");

    let result = method
        .invoke(&*target, &converted)
        .map_err(|err| BridgeError::Invocation {
            member: name.to_string(),
            message: err.to_string(),
        })?;
    if method.return_type().is_void() {
        return Ok(MultiValue::new());
    }
    Ok(MultiValue::from_vec(vec![bridge.push_value(lua, result)?]))
}

/// First candidate in declaration order whose parameter count matches and
/// whose every argument converts to the declared parameter type.
pub fn select_overload<'m>(
    bridge: &Bridge,
    candidates: impl IntoIterator<Item = &'m MethodInfo>,
    args: &[Value<'_>],
) -> Option<(&'m MethodInfo, Vec<HostValue>)> {
    candidates
        .into_iter()
        .filter(|method| method.arity() == args.len())
        .find_map(|method| {
            let converted = method
                .parameters()
                .iter()
                .zip(args)
                .map(|(param, arg)| admit(bridge, arg, &param.ty))
                .collect::<Option<Vec<_>>>()?;
            Some((method, converted))
        })
}

fn admit(bridge: &Bridge, arg: &Value<'_>, ty: &HostType) -> Option<HostValue> {
    let value = bridge.pop_value(arg, ty).ok()?;
    if value.is_null() && !ty.accepts_null() {
        return None;
    }
    Some(value)
}
