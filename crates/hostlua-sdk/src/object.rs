//! HostObject trait: the introspectable surface of a host object
//!
//! The bridge never looks at a host object's concrete Rust type. Everything it
//! needs (member enumeration, reads, writes, invocation, declared types) is
//! reached through the object's `HostClass`.

use std::any::Any;
use std::sync::Arc;

use crate::class::HostClass;
use crate::error::{HostError, HostResult};

/// A host object exposed to scripts.
///
/// Implementations keep their mutable state behind interior mutability: the
/// bridge only ever holds shared references, and the same object may be
/// reachable from several proxies at once.
///
/// ```ignore
/// static COUNTER: Lazy<HostClass> = Lazy::new(|| {
///     HostClass::builder::<Counter>("Counter")
///         .property("Count", HostType::I64, |c| Ok(HostValue::I64(c.count())))
///         .build()
/// });
///
/// impl HostObject for Counter {
///     fn class(&self) -> &HostClass { &COUNTER }
///     fn as_any(&self) -> &dyn Any { self }
/// }
/// ```
pub trait HostObject: Send + Sync + 'static {
    /// Class descriptor shared by every instance of this type
    fn class(&self) -> &HostClass;

    /// Upcast for downcasting back to the concrete type
    fn as_any(&self) -> &dyn Any;

    /// Textual form of the object
    fn to_display(&self) -> String {
        self.class().name().to_string()
    }
}

/// Downcast a host object to its concrete type.
pub fn downcast<T: HostObject>(obj: &dyn HostObject) -> HostResult<&T> {
    obj.as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| HostError::WrongReceiver {
            expected: std::any::type_name::<T>(),
            got: obj.class().name().to_string(),
        })
}

/// Whether two references point at the same host object
pub fn same_object(a: &Arc<dyn HostObject>, b: &Arc<dyn HostObject>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
