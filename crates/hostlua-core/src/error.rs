//! Error types for the bridge core

use hostlua_sdk::HostError;

use crate::marshal::MarshalError;

/// Errors raised by the bridge while serving a script
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The Lua state has no bridge installed
    #[error("hostlua bridge is not installed in this Lua state")]
    NotInstalled,

    /// The proxy's handle does not resolve
    #[error("invalid object reference")]
    InvalidObject,

    /// No method with this name on the object
    #[error("member '{member}' not found on {class}")]
    MemberNotFound {
        /// Class name of the target
        class: String,
        /// Requested member
        member: String,
    },

    /// No overload accepts the supplied arguments
    #[error("no overload of '{member}' accepts {arity} argument(s)")]
    NoOverload {
        /// Method name
        member: String,
        /// Number of real arguments supplied
        arity: usize,
    },

    /// The invoked host method failed
    #[error("{message}")]
    Invocation {
        /// Method name
        member: String,
        /// Original failure message
        message: String,
    },

    /// A property or field getter failed
    #[error("failed to read '{member}': {source}")]
    Read {
        /// Member name
        member: String,
        /// Host failure
        source: HostError,
    },

    /// A property or field setter failed
    #[error("failed to write '{member}': {source}")]
    Write {
        /// Member name
        member: String,
        /// Host failure
        source: HostError,
    },

    /// A value could not be converted for assignment
    #[error("cannot assign to '{member}': {source}")]
    Marshal {
        /// Member name
        member: String,
        /// Conversion failure
        source: MarshalError,
    },

    /// Error from the Lua state itself
    #[error(transparent)]
    Lua(#[from] mlua::Error),
}

/// Bridge result
pub type BridgeResult<T> = Result<T, BridgeError>;

impl From<BridgeError> for mlua::Error {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::Lua(inner) => inner,
            other => mlua::Error::RuntimeError(other.to_string()),
        }
    }
}
