//! Hostlua SDK - the host side of the bridge
//!
//! This crate describes host objects to the bridge without depending on the
//! scripting runtime: values (`HostValue`), declared types (`HostType`), the
//! `HostObject` trait and its `HostClass` descriptor.
//!
//! # Example
//!
//! ```ignore
//! use hostlua_sdk::{HostClass, HostObject, HostType, HostValue, IntoHost};
//!
//! struct Greeter { name: String }
//!
//! static GREETER: Lazy<HostClass> = Lazy::new(|| {
//!     HostClass::builder::<Greeter>("Greeter")
//!         .property("Name", HostType::String, |g| Ok(g.name.clone().into_host()))
//!         .method("Greet", [("who", HostType::String)], HostType::String, |g, args| {
//!             let who = String::from_host(&args[0])?;
//!             Ok(format!("{} greets {}", g.name, who).into_host())
//!         })
//!         .build()
//! });
//! ```

#![warn(missing_docs)]

pub mod class;
pub mod convert;
pub mod error;
pub mod object;
pub mod types;
pub mod value;

pub use class::{FieldInfo, HostClass, HostClassBuilder, MethodInfo, ParameterInfo, PropertyInfo};
pub use convert::{FromHost, IntoHost};
pub use error::{catch_panic, HostError, HostResult};
pub use object::{downcast, same_object, HostObject};
pub use types::HostType;
pub use value::{HostRef, HostValue};
