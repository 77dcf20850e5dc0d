//! Hostlua Core
//!
//! This crate connects host objects to a Lua state:
//! - Handle registry (handles to strong host references)
//! - Type bridge (one capability table per host type)
//! - Proxy userdata and its capability callbacks
//! - Overload selection for method calls
//! - Value marshalling in both directions

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod bridge;
pub mod dispatch;
pub mod error;
pub mod handle;
pub mod marshal;
pub mod proxy;
pub mod registry;
pub mod type_bridge;

pub use bridge::Bridge;
pub use error::{BridgeError, BridgeResult};
pub use handle::Handle;
pub use marshal::MarshalError;
pub use proxy::{proxy_handle, Proxy};
pub use registry::HandleRegistry;
pub use type_bridge::TypeBridge;

pub use mlua;
