//! Declared types of host members
//!
//! A `HostType` is what the introspection surface reports for a property,
//! field, parameter or return value. The bridge uses it to pick the numeric
//! kind an incoming script number is converted to and to decide whether a
//! nil argument is acceptable.

use std::any::TypeId;
use std::fmt;

use crate::object::HostObject;

/// Declared type of a host member
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostType {
    /// No value (method return only)
    Void,
    /// Boolean
    Bool,
    /// 8-bit signed integer
    I8,
    /// 16-bit signed integer
    I16,
    /// 32-bit signed integer
    I32,
    /// 64-bit signed integer
    I64,
    /// 8-bit unsigned integer
    U8,
    /// 16-bit unsigned integer
    U16,
    /// 32-bit unsigned integer
    U32,
    /// 64-bit unsigned integer
    U64,
    /// 32-bit float
    F32,
    /// 64-bit float
    F64,
    /// Text
    String,
    /// Object of one concrete host type
    Object {
        /// Rust type of the object
        type_id: TypeId,
        /// Rust type name, for diagnostics
        name: &'static str,
    },
    /// Object of any host type
    AnyObject,
    /// Any value
    Any,
    /// Value type that also accepts absence
    Nullable(Box<HostType>),
}

impl HostType {
    /// Object type for the host type `T`
    pub fn object<T: HostObject>() -> Self {
        HostType::Object {
            type_id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Nullable wrapper around `inner`
    pub fn nullable(inner: HostType) -> Self {
        match inner {
            HostType::Nullable(_) => inner,
            other => HostType::Nullable(Box::new(other)),
        }
    }

    /// Whether a null value may be assigned or passed to this type
    pub fn accepts_null(&self) -> bool {
        matches!(
            self,
            HostType::String
                | HostType::Object { .. }
                | HostType::AnyObject
                | HostType::Any
                | HostType::Nullable(_)
        )
    }

    /// Check for the void return type
    pub fn is_void(&self) -> bool {
        matches!(self, HostType::Void)
    }

    /// Check for an integer kind
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            HostType::I8
                | HostType::I16
                | HostType::I32
                | HostType::I64
                | HostType::U8
                | HostType::U16
                | HostType::U32
                | HostType::U64
        )
    }

    /// Check for a numeric kind
    pub fn is_numeric(&self) -> bool {
        self.is_integer() || matches!(self, HostType::F32 | HostType::F64)
    }

    /// The type with any `Nullable` wrapper removed
    pub fn underlying(&self) -> &HostType {
        match self {
            HostType::Nullable(inner) => inner.underlying(),
            other => other,
        }
    }
}

impl fmt::Display for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostType::Void => write!(f, "void"),
            HostType::Bool => write!(f, "bool"),
            HostType::I8 => write!(f, "i8"),
            HostType::I16 => write!(f, "i16"),
            HostType::I32 => write!(f, "i32"),
            HostType::I64 => write!(f, "i64"),
            HostType::U8 => write!(f, "u8"),
            HostType::U16 => write!(f, "u16"),
            HostType::U32 => write!(f, "u32"),
            HostType::U64 => write!(f, "u64"),
            HostType::F32 => write!(f, "f32"),
            HostType::F64 => write!(f, "f64"),
            HostType::String => write!(f, "string"),
            HostType::Object { name, .. } => write!(f, "{}", name),
            HostType::AnyObject => write!(f, "object"),
            HostType::Any => write!(f, "any"),
            HostType::Nullable(inner) => write!(f, "{}?", inner),
        }
    }
}
