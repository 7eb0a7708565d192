//! Error types for wraith operations

use thiserror::Error;

use crate::category::Category;
use crate::value::Value;

/// Main error type for wraith operations
#[derive(Error, Debug)]
pub enum WraithError {
    /// The carrier's target has been reclaimed.
    ///
    /// Raised synchronously from within the trapped operation that first
    /// touches a dead reference, and from every attempt after that. The
    /// message is fixed per category. Not retryable.
    #[error("This proxied {0} has been garbage collected")]
    Reclaimed(Category),

    /// An explicit category code outside the supported set was supplied.
    ///
    /// Fatal to the call that passed it; no carrier is produced.
    #[error("Unsupported proxy category: {0}")]
    UnsupportedCategory(u32),

    /// A trapped operation hit a target of the wrong shape
    #[error("Type error: {message}")]
    TypeError {
        /// What went wrong, in terms of the target's runtime type
        message: String,
    },

    /// Array element access outside the current bounds
    #[error("Index {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        /// The requested index
        index: usize,
        /// The array's length at access time
        len: usize,
    },

    /// Argument count didn't match a function's declared arity
    #[error("Arity mismatch calling `{name}`: expected {expected}, got {got}")]
    ArityMismatch {
        /// Declared parameter count
        expected: usize,
        /// Arguments actually supplied
        got: usize,
        /// Function name (for error messages)
        name: String,
    },
}

/// Result type alias for wraith operations
pub type Result<T> = std::result::Result<T, WraithError>;

/// Runtime type name of a value, for error messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Unit => "unit",
        Value::Bool(_) => "bool",
        Value::I64(_) => "i64",
        Value::F64(_) => "f64",
        Value::String(_) => "string",
        Value::Object(_) => "object",
        Value::Array(_) => "array",
        Value::Function(_) => "function",
    }
}

impl WraithError {
    /// Build a type error from anything displayable.
    pub fn type_error(message: impl Into<String>) -> Self {
        WraithError::TypeError {
            message: message.into(),
        }
    }
}
