//! Value marshalling between Lua and the host
//!
//! Outbound conversion never fails for scalars; objects allocate a new
//! registry entry and proxy every time they cross. Inbound conversion is
//! driven by the declared `HostType` of the receiving slot and is strict
//! about kinds: a number never becomes a string, a string never becomes a
//! number.

use hostlua_sdk::{HostType, HostValue};
use mlua::{Lua, Value};

use crate::bridge::Bridge;
use crate::error::BridgeResult;
use crate::proxy::proxy_handle;

/// Inbound conversion failure
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MarshalError {
    /// The value's kind cannot be held by the target type
    #[error("cannot convert {got} to {expected}")]
    Mismatch {
        /// Target type
        expected: String,
        /// Lua type name of the value
        got: &'static str,
    },

    /// A number does not fit the target kind
    #[error("{value} is out of range for {target}")]
    OutOfRange {
        /// The offending number
        value: String,
        /// Target type
        target: String,
    },

    /// A fractional number was given for an integer kind
    #[error("{value} has no exact {target} representation")]
    NotIntegral {
        /// The offending number
        value: String,
        /// Target type
        target: String,
    },

    /// nil was given for a type that cannot be absent
    #[error("nil is not allowed for {target}")]
    NullNotAllowed {
        /// Target type
        target: String,
    },
}

impl MarshalError {
    fn mismatch(target: &HostType, value: &Value<'_>) -> Self {
        MarshalError::Mismatch {
            expected: target.to_string(),
            got: value.type_name(),
        }
    }
}

#[derive(Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    fn describe(self) -> String {
        match self {
            Number::Int(i) => i.to_string(),
            Number::Float(f) => f.to_string(),
        }
    }

    /// Exact integer value, if there is one
    fn integral(self, target: &HostType) -> Result<i128, MarshalError> {
        match self {
            Number::Int(i) => Ok(i128::from(i)),
            Number::Float(f) if f.is_finite() && f.fract() == 0.0 => {
                // Anything beyond u64 is out of range for every integer kind.
                if f < -(2f64.powi(63)) || f >= 2f64.powi(64) {
                    return Err(MarshalError::OutOfRange {
                        value: self.describe(),
                        target: target.to_string(),
                    });
                }
                Ok(f as i128)
            }
            Number::Float(_) => Err(MarshalError::NotIntegral {
                value: self.describe(),
                target: target.to_string(),
            }),
        }
    }
}

fn narrow<T: TryFrom<i128>>(n: Number, target: &HostType) -> Result<T, MarshalError> {
    let wide = n.integral(target)?;
    T::try_from(wide).map_err(|_| MarshalError::OutOfRange {
        value: n.describe(),
        target: target.to_string(),
    })
}

fn number_to_host(n: Number, target: &HostType) -> Option<Result<HostValue, MarshalError>> {
    let converted = match target {
        HostType::I8 => narrow(n, target).map(HostValue::I8),
        HostType::I16 => narrow(n, target).map(HostValue::I16),
        HostType::I32 => narrow(n, target).map(HostValue::I32),
        HostType::I64 => narrow(n, target).map(HostValue::I64),
        HostType::U8 => narrow(n, target).map(HostValue::U8),
        HostType::U16 => narrow(n, target).map(HostValue::U16),
        HostType::U32 => narrow(n, target).map(HostValue::U32),
        HostType::U64 => narrow(n, target).map(HostValue::U64),
        HostType::F32 => Ok(HostValue::F32(n.as_f64() as f32)),
        HostType::F64 | HostType::Any => Ok(HostValue::F64(n.as_f64())),
        _ => return None,
    };
    Some(converted)
}

/// Convert a host value into a Lua value.
///
/// Objects are registered and wrapped in a fresh proxy.
pub fn push_value<'lua>(
    bridge: &Bridge,
    lua: &'lua Lua,
    value: HostValue,
) -> BridgeResult<Value<'lua>> {
    let pushed = match value {
        HostValue::Null => Value::Nil,
        HostValue::Bool(b) => Value::Boolean(b),
        HostValue::I8(v) => Value::Integer(v.into()),
        HostValue::I16(v) => Value::Integer(v.into()),
        HostValue::I32(v) => Value::Integer(v.into()),
        HostValue::I64(v) => Value::Integer(v),
        HostValue::U8(v) => Value::Integer(v.into()),
        HostValue::U16(v) => Value::Integer(v.into()),
        HostValue::U32(v) => Value::Integer(v.into()),
        HostValue::U64(v) => match i64::try_from(v) {
            Ok(i) => Value::Integer(i),
            Err(_) => Value::Number(v as f64),
        },
        HostValue::F32(v) => Value::Number(v.into()),
        HostValue::F64(v) => Value::Number(v),
        HostValue::String(s) => Value::String(lua.create_string(&s)?),
        HostValue::Object(obj) => Value::UserData(bridge.create_proxy(lua, obj)?),
    };
    Ok(pushed)
}

/// Convert a Lua value into a host value of the declared `target` type.
///
/// `nil` always becomes `HostValue::Null`; whether null is acceptable is up
/// to the caller (see `HostType::accepts_null`). A proxy whose handle no
/// longer resolves also becomes null.
pub fn pop_value(
    bridge: &Bridge,
    value: &Value<'_>,
    target: &HostType,
) -> Result<HostValue, MarshalError> {
    let target = target.underlying();
    match value {
        Value::Nil => Ok(HostValue::Null),
        Value::Boolean(b) => match target {
            HostType::Bool | HostType::Any => Ok(HostValue::Bool(*b)),
            _ => Err(MarshalError::mismatch(target, value)),
        },
        Value::Integer(i) => number_to_host(Number::Int(*i), target)
            .unwrap_or_else(|| Err(MarshalError::mismatch(target, value))),
        Value::Number(f) => number_to_host(Number::Float(*f), target)
            .unwrap_or_else(|| Err(MarshalError::mismatch(target, value))),
        Value::String(s) => match target {
            HostType::String | HostType::Any => {
                Ok(HostValue::String(s.to_string_lossy().into_owned()))
            }
            _ => Err(MarshalError::mismatch(target, value)),
        },
        Value::UserData(ud) => {
            let Some(obj) = proxy_handle(ud).and_then(|h| bridge.registry().lookup(h)) else {
                return Ok(HostValue::Null);
            };
            let admissible = match target {
                HostType::Object { type_id, .. } => obj.class().type_id() == *type_id,
                HostType::AnyObject | HostType::Any => true,
                _ => false,
            };
            if admissible {
                Ok(HostValue::Object(obj))
            } else {
                Err(MarshalError::Mismatch {
                    expected: target.to_string(),
                    got: "userdata",
                })
            }
        }
        _ => Ok(HostValue::Null),
    }
}
