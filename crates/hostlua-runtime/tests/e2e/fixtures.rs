//! Host object fixtures

use hostlua_runtime::{HostClass, HostObject, HostType, HostValue};
use hostlua_sdk::{FromHost, HostError, IntoHost};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::any::Any;
use std::sync::Arc;

/// Named value with a log, the usual root object
pub struct Settings {
    pub name: Mutex<String>,
    pub value: Mutex<i64>,
    pub log: Mutex<Vec<String>>,
}

impl Settings {
    pub fn new(name: &str, value: i64) -> Arc<Self> {
        Arc::new(Self {
            name: Mutex::new(name.to_string()),
            value: Mutex::new(value),
            log: Mutex::new(Vec::new()),
        })
    }
}

static SETTINGS: Lazy<HostClass> = Lazy::new(|| {
    HostClass::builder::<Settings>("Settings")
        .property_rw(
            "Name",
            HostType::String,
            |s| Ok(s.name.lock().clone().into_host()),
            |s, v| {
                *s.name.lock() = Option::<String>::from_host(&v)?.unwrap_or_default();
                Ok(())
            },
        )
        .property_rw(
            "Value",
            HostType::I64,
            |s| Ok(HostValue::I64(*s.value.lock())),
            |s, v| {
                *s.value.lock() = i64::from_host(&v)?;
                Ok(())
            },
        )
        .property("LogCount", HostType::I32, |s| Ok(HostValue::I32(s.log.lock().len() as i32)))
        .method("Log", [], HostType::Void, |s, _| {
            let entry = format!("{}={}", s.name.lock(), s.value.lock());
            s.log.lock().push(entry);
            Ok(HostValue::Null)
        })
        .method("Log", [("message", HostType::String)], HostType::Void, |s, args| {
            s.log.lock().push(String::from_host(&args[0])?);
            Ok(HostValue::Null)
        })
        .method("Greet", [("who", HostType::String)], HostType::String, |s, args| {
            let who = String::from_host(&args[0])?;
            Ok(format!("{} greets {}", s.name.lock(), who).into_host())
        })
        .method("Scale", [("factor", HostType::F64)], HostType::F64, |s, args| {
            let factor = f64::from_host(&args[0])?;
            Ok(HostValue::F64(*s.value.lock() as f64 * factor))
        })
        .method("Child", [("name", HostType::String)], HostType::object::<Settings>(), |_, args| {
            let name = String::from_host(&args[0])?;
            Ok(HostValue::Object(Settings::new(&name, 0)))
        })
        .method(
            "Adopt",
            [("other", HostType::nullable(HostType::object::<Settings>()))],
            HostType::String,
            |_, args| match args[0].as_object() {
                Some(other) => {
                    let other = hostlua_sdk::downcast::<Settings>(&**other)?;
                    Ok(other.name.lock().clone().into_host())
                }
                None => Ok("nobody".into_host()),
            },
        )
        .method("Fail", [], HostType::Void, |_, _| Err(HostError::Failed("disk full".into())))
        .build()
});

impl HostObject for Settings {
    fn class(&self) -> &HostClass {
        &SETTINGS
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn to_display(&self) -> String {
        format!("Settings({})", self.name.lock())
    }
}
