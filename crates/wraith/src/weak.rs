//! Non-owning references to heap values

use std::sync::{Arc, Weak};

use crate::error::{type_name, Result, WraithError};
use crate::value::{ArrayValue, FunctionValue, ObjectValue, Value};

/// A non-owning reference to a heap value.
///
/// Wraps exactly one target at construction and never keeps it alive.
/// Once the last strong handle to the target drops, `resolve` is
/// permanently `None`; there is no resurrection.
#[derive(Debug, Clone)]
pub enum WeakValue {
    /// Weak handle to an object payload
    Object(Weak<ObjectValue>),

    /// Weak handle to an array payload
    Array(Weak<ArrayValue>),

    /// Weak handle to a function payload
    Function(Weak<FunctionValue>),
}

impl WeakValue {
    /// Recover the live target, or `None` if it has been reclaimed.
    ///
    /// This is a pure read; it never extends the target's lifetime beyond
    /// the returned value's own strong handle.
    pub fn resolve(&self) -> Option<Value> {
        match self {
            WeakValue::Object(w) => w.upgrade().map(Value::Object),
            WeakValue::Array(w) => w.upgrade().map(Value::Array),
            WeakValue::Function(w) => w.upgrade().map(Value::Function),
        }
    }

    /// Check whether the target is still alive
    pub fn is_live(&self) -> bool {
        match self {
            WeakValue::Object(w) => w.strong_count() > 0,
            WeakValue::Array(w) => w.strong_count() > 0,
            WeakValue::Function(w) => w.strong_count() > 0,
        }
    }
}

impl Value {
    /// Take a fresh non-owning reference to this value's heap payload.
    ///
    /// # Errors
    ///
    /// Returns `TypeError` for values without a stable heap identity
    /// (primitives and strings cannot be weakly referenced).
    pub fn downgrade(&self) -> Result<WeakValue> {
        match self {
            Value::Object(o) => Ok(WeakValue::Object(Arc::downgrade(o))),
            Value::Array(a) => Ok(WeakValue::Array(Arc::downgrade(a))),
            Value::Function(f) => Ok(WeakValue::Function(Arc::downgrade(f))),
            other => Err(WraithError::type_error(format!(
                "cannot weakly reference {}",
                type_name(other)
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ObjectValue;

    #[test]
    fn test_resolve_while_live() {
        let target = Value::object(ObjectValue::new().with_prop("v", Value::I64(42)));
        let weak = target.downgrade().unwrap();

        assert!(weak.is_live());
        let live = weak.resolve().unwrap();
        assert_eq!(live, target);
    }

    #[test]
    fn test_resolve_after_drop_is_permanently_none() {
        let target = Value::array(vec![Value::I64(1)]);
        let weak = target.downgrade().unwrap();
        drop(target);

        assert!(!weak.is_live());
        assert!(weak.resolve().is_none());
        // No resurrection
        assert!(weak.resolve().is_none());
    }

    #[test]
    fn test_clones_share_liveness() {
        let target = Value::native("id", 1, |args| Ok(args[0].clone()));
        let weak = target.downgrade().unwrap();
        let alias = target.clone();
        drop(target);

        // A clone still holds the payload
        assert!(weak.resolve().is_some());
        drop(alias);
        assert!(weak.resolve().is_none());
    }

    #[test]
    fn test_primitives_are_not_referenceable() {
        for v in [Value::Unit, Value::Bool(true), Value::I64(1), Value::string("s")] {
            assert!(v.downgrade().is_err());
        }
    }
}
