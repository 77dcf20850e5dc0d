//! Runtime error types.

use hostlua_core::{BridgeError, MarshalError};

/// Errors that can occur while setting up an engine or running scripts.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// File I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// The script raised an error; carries the innermost message
    #[error("Script error: {0}")]
    Script(String),

    /// Bridge failure outside of a script run
    #[error("Bridge error: {0}")]
    Bridge(#[from] BridgeError),

    /// A script result could not be converted to a host value
    #[error("Marshal error: {0}")]
    Marshal(#[from] MarshalError),

    /// Lua state error outside of a script run
    #[error("Lua error: {0}")]
    Lua(#[from] mlua::Error),
}

impl RuntimeError {
    /// Wrap an error raised while running a script
    pub fn script(err: mlua::Error) -> Self {
        RuntimeError::Script(innermost_message(&err))
    }
}

/// Message of the innermost cause of a Lua error.
///
/// Errors raised inside callbacks arrive wrapped in one `CallbackError` per
/// Rust frame they crossed; only the root message is useful to the host.
pub fn innermost_message(err: &mlua::Error) -> String {
    match err {
        mlua::Error::CallbackError { cause, .. } => innermost_message(cause),
        mlua::Error::RuntimeError(msg) => msg.clone(),
        mlua::Error::SyntaxError { message, .. } => message.clone(),
        other => other.to_string(),
    }
}
