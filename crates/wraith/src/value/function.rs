//! Callable values: native functions with declared arity

use std::sync::Arc;

use crate::error::{Result, WraithError};

use super::Value;

/// Type alias for native function pointers to reduce signature complexity
pub type NativeFnPtr = Arc<dyn Fn(&[Value]) -> Result<Value> + Send + Sync>;

/// A native function exposed as a value.
///
/// Functions are immutable once built: they carry no property map, only a
/// name and arity for introspection.
#[derive(Clone)]
pub struct FunctionValue {
    /// Function name (for display/debugging)
    pub name: String,

    /// Arity (-1 for variadic)
    pub arity: i32,

    /// The actual function pointer
    func: NativeFnPtr,
}

impl FunctionValue {
    /// Create a new function value
    pub fn new(
        name: impl Into<String>,
        arity: i32,
        func: impl Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            arity,
            func: Arc::new(func),
        }
    }

    /// Invoke the function.
    ///
    /// # Errors
    ///
    /// Returns `ArityMismatch` if the function declares a fixed arity and
    /// the argument count doesn't match. Errors from the function body
    /// propagate unchanged.
    pub fn invoke(&self, args: &[Value]) -> Result<Value> {
        if self.arity >= 0 && args.len() != self.arity as usize {
            return Err(WraithError::ArityMismatch {
                expected: self.arity as usize,
                got: args.len(),
                name: self.name.clone(),
            });
        }
        (self.func)(args)
    }
}

impl std::fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FunctionValue({})", self.name)
    }
}
