//! Hostlua Runtime
//!
//! The facade over the bridge: create an `Engine`, register host objects as
//! globals, run scripts.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod engine;
pub mod error;
pub mod options;

use std::sync::Once;

pub use engine::Engine;
pub use error::{innermost_message, RuntimeError};
pub use options::{EngineOptions, ResourceLimits};

pub use hostlua_core::{Handle, HandleRegistry};
pub use hostlua_sdk::{HostClass, HostObject, HostRef, HostType, HostValue};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=hostlua_core=trace` or `RUST_LOG=hostlua_runtime=debug`.
///
/// ```rust,ignore
/// hostlua_runtime::init_tracing();
/// let engine = hostlua_runtime::Engine::new()?;
/// ```
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}
