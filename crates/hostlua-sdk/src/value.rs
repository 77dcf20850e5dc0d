//! HostValue: the host side of every value that crosses the bridge
//!
//! Scalars are carried by kind so that a declared `i32` parameter receives an
//! `I32` and a declared `f32` return is reported as such. Everything that is
//! not a scalar travels as an `Object`, a shared reference to a host object.

use std::fmt;
use std::sync::Arc;

use crate::object::HostObject;

/// Shared reference to a host object
pub type HostRef = Arc<dyn HostObject>;

/// A host value
#[derive(Clone, Default)]
pub enum HostValue {
    /// Absence of a value
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// 8-bit signed integer
    I8(i8),
    /// 16-bit signed integer
    I16(i16),
    /// 32-bit signed integer
    I32(i32),
    /// 64-bit signed integer
    I64(i64),
    /// 8-bit unsigned integer
    U8(u8),
    /// 16-bit unsigned integer
    U16(u16),
    /// 32-bit unsigned integer
    U32(u32),
    /// 64-bit unsigned integer
    U64(u64),
    /// 32-bit float
    F32(f32),
    /// 64-bit float
    F64(f64),
    /// Text
    String(String),
    /// Reference to a host object
    Object(HostRef),
}

impl HostValue {
    /// Check if value is null
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, HostValue::Null)
    }

    /// Check if value is any integer kind
    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            HostValue::I8(_)
                | HostValue::I16(_)
                | HostValue::I32(_)
                | HostValue::I64(_)
                | HostValue::U8(_)
                | HostValue::U16(_)
                | HostValue::U32(_)
                | HostValue::U64(_)
        )
    }

    /// Check if value is any numeric kind
    pub fn is_number(&self) -> bool {
        self.is_integer() || matches!(self, HostValue::F32(_) | HostValue::F64(_))
    }

    /// Extract boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            HostValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract any integer kind widened to i64
    ///
    /// A `U64` above `i64::MAX` yields `None`.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            HostValue::I8(v) => Some(v.into()),
            HostValue::I16(v) => Some(v.into()),
            HostValue::I32(v) => Some(v.into()),
            HostValue::I64(v) => Some(v),
            HostValue::U8(v) => Some(v.into()),
            HostValue::U16(v) => Some(v.into()),
            HostValue::U32(v) => Some(v.into()),
            HostValue::U64(v) => i64::try_from(v).ok(),
            _ => None,
        }
    }

    /// Extract any numeric kind as f64
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            HostValue::F32(v) => Some(v.into()),
            HostValue::F64(v) => Some(v),
            HostValue::U64(v) => Some(v as f64),
            _ => self.as_i64().map(|v| v as f64),
        }
    }

    /// Borrow text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            HostValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow the object reference
    pub fn as_object(&self) -> Option<&HostRef> {
        match self {
            HostValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Get type name for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            HostValue::Null => "null",
            HostValue::Bool(_) => "bool",
            HostValue::I8(_) => "i8",
            HostValue::I16(_) => "i16",
            HostValue::I32(_) => "i32",
            HostValue::I64(_) => "i64",
            HostValue::U8(_) => "u8",
            HostValue::U16(_) => "u16",
            HostValue::U32(_) => "u32",
            HostValue::U64(_) => "u64",
            HostValue::F32(_) => "f32",
            HostValue::F64(_) => "f64",
            HostValue::String(_) => "string",
            HostValue::Object(_) => "object",
        }
    }
}

impl PartialEq for HostValue {
    fn eq(&self, other: &Self) -> bool {
        use HostValue::*;
        match (self, other) {
            (Null, Null) => true,
            (Bool(a), Bool(b)) => a == b,
            (I8(a), I8(b)) => a == b,
            (I16(a), I16(b)) => a == b,
            (I32(a), I32(b)) => a == b,
            (I64(a), I64(b)) => a == b,
            (U8(a), U8(b)) => a == b,
            (U16(a), U16(b)) => a == b,
            (U32(a), U32(b)) => a == b,
            (U64(a), U64(b)) => a == b,
            (F32(a), F32(b)) => a == b,
            (F64(a), F64(b)) => a == b,
            (String(a), String(b)) => a == b,
            // Objects compare by identity
            (Object(a), Object(b)) => std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b)),
            _ => false,
        }
    }
}

impl fmt::Debug for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostValue::Null => write!(f, "HostValue::Null"),
            HostValue::Bool(v) => write!(f, "HostValue::Bool({})", v),
            HostValue::I8(v) => write!(f, "HostValue::I8({})", v),
            HostValue::I16(v) => write!(f, "HostValue::I16({})", v),
            HostValue::I32(v) => write!(f, "HostValue::I32({})", v),
            HostValue::I64(v) => write!(f, "HostValue::I64({})", v),
            HostValue::U8(v) => write!(f, "HostValue::U8({})", v),
            HostValue::U16(v) => write!(f, "HostValue::U16({})", v),
            HostValue::U32(v) => write!(f, "HostValue::U32({})", v),
            HostValue::U64(v) => write!(f, "HostValue::U64({})", v),
            HostValue::F32(v) => write!(f, "HostValue::F32({})", v),
            HostValue::F64(v) => write!(f, "HostValue::F64({})", v),
            HostValue::String(s) => write!(f, "HostValue::String({:?})", s),
            HostValue::Object(obj) => write!(f, "HostValue::Object({})", obj.class().name()),
        }
    }
}
