//! Error types for host-side member access

/// Result type for host member reads, writes and invocations
pub type HostResult<T> = Result<T, HostError>;

/// Host object error types
#[derive(Debug, Clone, thiserror::Error)]
pub enum HostError {
    /// Type mismatch during conversion
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        /// Expected type name
        expected: String,
        /// Actual type name
        got: String,
    },

    /// Invalid argument
    #[error("Argument error: {0}")]
    Argument(String),

    /// A member closure was handed an object of another class
    #[error("Wrong receiver: expected {expected}, got {got}")]
    WrongReceiver {
        /// Rust type the member was declared on
        expected: &'static str,
        /// Class name of the object it was called with
        got: String,
    },

    /// Host code panicked
    #[error("{0}")]
    Panic(String),

    /// Host code reported a failure
    #[error("{0}")]
    Failed(String),
}

impl HostError {
    /// Shorthand for a type mismatch against a `HostValue`
    pub fn mismatch(expected: impl Into<String>, got: impl Into<String>) -> Self {
        HostError::TypeMismatch {
            expected: expected.into(),
            got: got.into(),
        }
    }
}

impl From<String> for HostError {
    fn from(s: String) -> Self {
        HostError::Failed(s)
    }
}

impl From<&str> for HostError {
    fn from(s: &str) -> Self {
        HostError::Failed(s.to_string())
    }
}

/// Run host code, turning a panic into `HostError::Panic`.
///
/// Member closures run while a Lua call is on the stack; unwinding through
/// the interpreter is not an option, so every read, write and invocation
/// goes through here.
pub fn catch_panic<T>(f: impl FnOnce() -> HostResult<T>) -> HostResult<T> {
    std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)).unwrap_or_else(|panic| {
        let msg = if let Some(s) = panic.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic.downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        Err(HostError::Panic(msg))
    })
}
