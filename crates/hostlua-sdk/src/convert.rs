//! Conversion traits between `HostValue` and Rust types.
//!
//! Member closures receive their arguments as `HostValue`s already converted
//! to the declared parameter type; `FromHost` pulls the Rust value back out
//! and `IntoHost` wraps a result.
//!
//! ```ignore
//! .method("Add", [("n", HostType::I64)], HostType::I64, |c, args| {
//!     let n = i64::from_host(&args[0])?;
//!     Ok(c.add(n).into_host())
//! })
//! ```

use crate::error::{HostError, HostResult};
use crate::value::{HostRef, HostValue};

/// Convert from HostValue to Rust type.
pub trait FromHost: Sized {
    /// Convert, returning an error if the kind doesn't match
    fn from_host(value: &HostValue) -> HostResult<Self>;
}

/// Convert from Rust type to HostValue.
pub trait IntoHost {
    /// Convert to HostValue
    fn into_host(self) -> HostValue;
}

macro_rules! scalar_conversions {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl FromHost for $ty {
                fn from_host(value: &HostValue) -> HostResult<Self> {
                    match value {
                        HostValue::$variant(v) => Ok(*v),
                        other => Err(HostError::mismatch(stringify!($ty), other.type_name())),
                    }
                }
            }

            impl IntoHost for $ty {
                fn into_host(self) -> HostValue {
                    HostValue::$variant(self)
                }
            }
        )*
    };
}

scalar_conversions! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
}

impl FromHost for String {
    fn from_host(value: &HostValue) -> HostResult<Self> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| HostError::mismatch("string", value.type_name()))
    }
}

impl IntoHost for String {
    fn into_host(self) -> HostValue {
        HostValue::String(self)
    }
}

impl IntoHost for &str {
    fn into_host(self) -> HostValue {
        HostValue::String(self.to_string())
    }
}

impl FromHost for HostRef {
    fn from_host(value: &HostValue) -> HostResult<Self> {
        value
            .as_object()
            .cloned()
            .ok_or_else(|| HostError::mismatch("object", value.type_name()))
    }
}

impl IntoHost for HostRef {
    fn into_host(self) -> HostValue {
        HostValue::Object(self)
    }
}

impl<T: FromHost> FromHost for Option<T> {
    fn from_host(value: &HostValue) -> HostResult<Self> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_host(value).map(Some)
        }
    }
}

impl<T: IntoHost> IntoHost for Option<T> {
    fn into_host(self) -> HostValue {
        match self {
            Some(v) => v.into_host(),
            None => HostValue::Null,
        }
    }
}

// Unit type (for methods that return void)
impl IntoHost for () {
    fn into_host(self) -> HostValue {
        HostValue::Null
    }
}

impl IntoHost for HostValue {
    fn into_host(self) -> HostValue {
        self
    }
}
