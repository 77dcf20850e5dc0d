//! Per-type capability tables
//!
//! Every host type gets one capability table in the Lua named registry,
//! keyed by a name derived from its Rust `TypeId`. The table holds the
//! dispatch callbacks that proxies of that type forward to, plus the name
//! itself under `__name`.

use std::any::TypeId;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use dashmap::DashMap;
use hostlua_sdk::HostClass;
use mlua::{Lua, Table};
use rustc_hash::FxHasher;
use tracing::debug;

use crate::dispatch;

/// Slot holding the table's own key
pub const NAME_SLOT: &str = "__name";
/// Member read callback
pub const INDEX_SLOT: &str = "__index";
/// Member write callback
pub const NEWINDEX_SLOT: &str = "__newindex";
/// Textual representation callback
pub const TOSTRING_SLOT: &str = "__tostring";

const NAME_PREFIX: &str = "hostlua";

/// Derives capability-table names and installs the tables
#[derive(Debug, Default)]
pub struct TypeBridge {
    names: DashMap<TypeId, Arc<str>>,
}

impl TypeBridge {
    /// Create a type bridge with an empty name cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Stable capability-table key for the class's Rust type.
    ///
    /// Derived on first use and cached for the lifetime of the bridge.
    pub fn name_for(&self, class: &HostClass) -> Arc<str> {
        if let Some(name) = self.names.get(&class.type_id()) {
            return Arc::clone(&name);
        }
        let derived: Arc<str> = derive_name(class).into();
        Arc::clone(self.names.entry(class.type_id()).or_insert(derived).value())
    }

    /// Return the capability table for the class, installing it first if this
    /// Lua state has none yet.
    pub fn ensure_capabilities<'lua>(
        &self,
        lua: &'lua Lua,
        class: &HostClass,
    ) -> mlua::Result<Table<'lua>> {
        let name = self.name_for(class);
        let existing: Option<Table<'lua>> = lua.named_registry_value(&name)?;
        if let Some(table) = existing {
            return Ok(table);
        }

        let table = lua.create_table()?;
        table.raw_set(NAME_SLOT, &*name)?;
        table.raw_set(INDEX_SLOT, lua.create_function(dispatch::index_slot)?)?;
        table.raw_set(NEWINDEX_SLOT, lua.create_function(dispatch::newindex_slot)?)?;
        table.raw_set(TOSTRING_SLOT, lua.create_function(dispatch::tostring_slot)?)?;
        lua.set_named_registry_value(&name, table.clone())?;

        debug!(%name, class = class.name(), "installed capability table");
        Ok(table)
    }

    /// Check whether the class's capability table exists in this Lua state
    pub fn is_installed(&self, lua: &Lua, class: &HostClass) -> bool {
        let name = self.name_for(class);
        let found: mlua::Result<Option<Table<'_>>> = lua.named_registry_value(&name);
        matches!(found, Ok(Some(_)))
    }
}

fn derive_name(class: &HostClass) -> String {
    let mut hasher = FxHasher::default();
    class.type_id().hash(&mut hasher);
    format!("{}.{}:{:016x}", NAME_PREFIX, class.name(), hasher.finish())
}
