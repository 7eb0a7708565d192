//! Value trait implementations: constructors, predicates, extractors, From traits, PartialEq

use std::sync::Arc;

use crate::error::Result;

use super::*;

// ═══════════════════════════════════════════════════════════════════
// Convenience Constructors
// ═══════════════════════════════════════════════════════════════════

impl Value {
    /// Create a string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Arc::new(s.into()))
    }

    /// Create an object value
    pub fn object(o: ObjectValue) -> Self {
        Value::Object(Arc::new(o))
    }

    /// Create an array value from its elements
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Arc::new(ArrayValue::new(items)))
    }

    /// Create a function value
    pub fn function(f: FunctionValue) -> Self {
        Value::Function(Arc::new(f))
    }

    /// Create a native function value directly from a closure
    pub fn native(
        name: impl Into<String>,
        arity: i32,
        func: impl Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        Value::function(FunctionValue::new(name, arity, func))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Type Predicates
    // ═══════════════════════════════════════════════════════════════════
    /// Check if value is unit type
    pub fn is_unit(&self) -> bool {
        matches!(self, Value::Unit)
    }

    /// Check if value is boolean
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Check if value is numeric (integer or float)
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::I64(_) | Value::F64(_))
    }

    /// Check if value is a string
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Check if value is an object
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Check if value is an array
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Check if value is callable
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Extractors (return Option for safe access)
    // ═══════════════════════════════════════════════════════════════════
    /// Extract boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract as i64
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I64(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract as f64 (converts from integers)
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::F64(n) => Some(*n),
            Value::I64(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Extract as usize (non-negative integers only)
    pub fn as_usize(&self) -> Option<usize> {
        match self {
            Value::I64(n) => usize::try_from(*n).ok(),
            _ => None,
        }
    }

    /// Extract string contents
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Extract the object payload
    pub fn as_object(&self) -> Option<&Arc<ObjectValue>> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Extract the array payload
    pub fn as_array(&self) -> Option<&Arc<ArrayValue>> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Extract the function payload
    pub fn as_function(&self) -> Option<&Arc<FunctionValue>> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// From Conversions
// ═══════════════════════════════════════════════════════════════════

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::I64(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::F64(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<ObjectValue> for Value {
    fn from(o: ObjectValue) -> Self {
        Value::object(o)
    }
}

impl From<FunctionValue> for Value {
    fn from(f: FunctionValue) -> Self {
        Value::function(f)
    }
}

// ═══════════════════════════════════════════════════════════════════
// Equality
// ═══════════════════════════════════════════════════════════════════

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Unit, Value::Unit) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::F64(a), Value::F64(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            // Structural equality for objects and arrays, short-circuiting
            // on shared identity
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b) || **a == **b,
            (Value::Array(a), Value::Array(b)) => Arc::ptr_eq(a, b) || **a == **b,
            // Functions compare by identity only
            (Value::Function(a), Value::Function(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}
