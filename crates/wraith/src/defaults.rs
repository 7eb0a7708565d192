//! Pass-through defaults for trapped operations.
//!
//! Every operation a [`Handler`](crate::Handler) leaves unset delegates
//! here with the live target substituted in. The functions are public so
//! custom interceptors can fall back to the ordinary semantics after
//! doing their own work.

use crate::error::{type_name, Result, WraithError};
use crate::handler::{PropKey, PropertyDescriptor};
use crate::value::{ObjectValue, Value};

/// Read a property from the live target.
///
/// Objects look up the named property (absent properties read as `Unit`),
/// arrays resolve element indices and the `length` pseudo-property,
/// functions expose `name` and `length` introspection.
///
/// # Errors
///
/// Returns `IndexOutOfBounds` for array element reads outside the current
/// bounds, and `TypeError` for targets without a property model.
pub fn get(target: &Value, key: &PropKey) -> Result<Value> {
    match target {
        Value::Object(obj) => {
            let name = key.to_string();
            Ok(obj.get(&name).unwrap_or(Value::Unit))
        }
        Value::Array(arr) => match key {
            PropKey::Index(i) => arr.get(*i).ok_or_else(|| WraithError::IndexOutOfBounds {
                index: *i,
                len: arr.len(),
            }),
            k if k.is_length() => Ok(Value::I64(arr.len() as i64)),
            PropKey::Name(_) => Ok(Value::Unit),
        },
        Value::Function(func) => match key.as_name() {
            Some("name") => Ok(Value::string(func.name.clone())),
            Some("length") => Ok(Value::I64(i64::from(func.arity.max(0)))),
            _ => Ok(Value::Unit),
        },
        other => Err(WraithError::type_error(format!(
            "cannot read properties of {}",
            type_name(other)
        ))),
    }
}

/// Write a property on the live target.
///
/// # Errors
///
/// Returns `TypeError` for named writes to arrays, any write to a
/// function (functions are immutable), and targets without a property
/// model.
pub fn set(target: &Value, key: &PropKey, value: Value) -> Result<()> {
    match target {
        Value::Object(obj) => {
            obj.set(key.to_string(), value);
            Ok(())
        }
        Value::Array(arr) => match key {
            PropKey::Index(i) => {
                arr.set(*i, value);
                Ok(())
            }
            PropKey::Name(name) => Err(WraithError::type_error(format!(
                "cannot set named property `{}` on array",
                name
            ))),
        },
        other => Err(WraithError::type_error(format!(
            "cannot set properties of {}",
            type_name(other)
        ))),
    }
}

/// Check whether the live target has a property.
///
/// # Errors
///
/// Returns `TypeError` for targets without a property model.
pub fn has(target: &Value, key: &PropKey) -> Result<bool> {
    match target {
        Value::Object(obj) => Ok(obj.has(&key.to_string())),
        Value::Array(arr) => Ok(match key {
            PropKey::Index(i) => *i < arr.len(),
            k => k.is_length(),
        }),
        Value::Function(_) => Ok(matches!(key.as_name(), Some("name" | "length"))),
        other => Err(WraithError::type_error(format!(
            "cannot query properties of {}",
            type_name(other)
        ))),
    }
}

/// Delete a property from the live target.
///
/// Object deletion removes the property; array deletion blanks an
/// in-bounds element to `Unit`. Function intrinsics cannot be deleted.
///
/// # Errors
///
/// Returns `TypeError` for targets without a property model.
pub fn delete(target: &Value, key: &PropKey) -> Result<bool> {
    match target {
        Value::Object(obj) => Ok(obj.delete(&key.to_string())),
        Value::Array(arr) => Ok(match key {
            PropKey::Index(i) => arr.delete(*i),
            PropKey::Name(_) => false,
        }),
        Value::Function(_) => Ok(false),
        other => Err(WraithError::type_error(format!(
            "cannot delete properties of {}",
            type_name(other)
        ))),
    }
}

/// Enumerate the live target's own keys.
///
/// # Errors
///
/// Returns `TypeError` for targets without a property model.
pub fn own_keys(target: &Value) -> Result<Vec<PropKey>> {
    match target {
        Value::Object(obj) => Ok(obj.keys().into_iter().map(PropKey::Name).collect()),
        Value::Array(arr) => {
            let mut keys: Vec<PropKey> = (0..arr.len()).map(PropKey::Index).collect();
            keys.push(PropKey::from("length"));
            Ok(keys)
        }
        Value::Function(_) => Ok(vec![PropKey::from("name"), PropKey::from("length")]),
        other => Err(WraithError::type_error(format!(
            "cannot enumerate keys of {}",
            type_name(other)
        ))),
    }
}

/// Report the live target's own property descriptor for a key, or `None`
/// if the target does not define it.
///
/// # Errors
///
/// Returns `TypeError` for targets without a property model.
pub fn descriptor(target: &Value, key: &PropKey) -> Result<Option<PropertyDescriptor>> {
    match target {
        Value::Object(obj) => Ok(obj.get(&key.to_string()).map(PropertyDescriptor::data)),
        Value::Array(arr) => Ok(match key {
            PropKey::Index(i) => arr.get(*i).map(PropertyDescriptor::data),
            k if k.is_length() => Some(PropertyDescriptor {
                value: Value::I64(arr.len() as i64),
                writable: true,
                enumerable: false,
                configurable: false,
            }),
            PropKey::Name(_) => None,
        }),
        Value::Function(func) => Ok(match key.as_name() {
            Some("name") => Some(intrinsic(Value::string(func.name.clone()))),
            Some("length") => Some(intrinsic(Value::I64(i64::from(func.arity.max(0))))),
            _ => None,
        }),
        other => Err(WraithError::type_error(format!(
            "cannot introspect properties of {}",
            type_name(other)
        ))),
    }
}

// Function name/length report as read-only, non-enumerable data properties.
fn intrinsic(value: Value) -> PropertyDescriptor {
    PropertyDescriptor {
        value,
        writable: false,
        enumerable: false,
        configurable: true,
    }
}

/// Invoke the live target as a function.
///
/// # Errors
///
/// Returns `TypeError` if the target is not callable; arity and body
/// errors propagate from the function itself.
pub fn apply(target: &Value, args: &[Value]) -> Result<Value> {
    match target {
        Value::Function(func) => func.invoke(args),
        other => Err(WraithError::type_error(format!(
            "expected function, found `{}`",
            type_name(other)
        ))),
    }
}

/// Construct from the live target: invoke it, returning heap results
/// unchanged and boxing primitive results into a one-property object
/// `{ value: v }`.
///
/// # Errors
///
/// Same as [`apply`].
pub fn construct(target: &Value, args: &[Value]) -> Result<Value> {
    let result = apply(target, args)?;
    Ok(match result {
        boxed @ (Value::String(_) | Value::Object(_) | Value::Array(_) | Value::Function(_)) => {
            boxed
        }
        primitive => Value::object(ObjectValue::new().with_prop("value", primitive)),
    })
}

// ═══════════════════════════════════════════════════════════════════
// Array-Category Structural Defaults
// ═══════════════════════════════════════════════════════════════════

/// Key enumeration for an array-category carrier: exactly `["length"]`,
/// regardless of the live target's shape.
pub fn array_own_keys(_target: &Value) -> Result<Vec<PropKey>> {
    Ok(vec![PropKey::from("length")])
}

/// Descriptor introspection for an array-category carrier: the fixed
/// synthetic `length` descriptor, falling through to the live target's
/// real descriptor machinery for any other key.
pub fn array_descriptor(target: &Value, key: &PropKey) -> Result<Option<PropertyDescriptor>> {
    if key.is_length() {
        Ok(Some(PropertyDescriptor::synthetic_length()))
    } else {
        descriptor(target, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_object() -> Value {
        Value::object(ObjectValue::new().with_prop("v", Value::I64(42)))
    }

    #[test]
    fn test_object_get_set() {
        let obj = sample_object();
        assert_eq!(get(&obj, &"v".into()).unwrap(), Value::I64(42));
        assert_eq!(get(&obj, &"missing".into()).unwrap(), Value::Unit);

        set(&obj, &"w".into(), Value::Bool(true)).unwrap();
        assert_eq!(get(&obj, &"w".into()).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_array_get_length_and_elements() {
        let arr = Value::array(vec![Value::I64(1), Value::I64(2), Value::I64(3)]);
        assert_eq!(get(&arr, &"length".into()).unwrap(), Value::I64(3));
        assert_eq!(get(&arr, &1.into()).unwrap(), Value::I64(2));

        let err = get(&arr, &9.into()).unwrap_err();
        assert!(matches!(err, WraithError::IndexOutOfBounds { index: 9, len: 3 }));
    }

    #[test]
    fn test_array_named_set_rejected() {
        let arr = Value::array(vec![]);
        assert!(set(&arr, &"x".into(), Value::Unit).is_err());
        set(&arr, &2.into(), Value::I64(9)).unwrap();
        assert_eq!(get(&arr, &"length".into()).unwrap(), Value::I64(3));
    }

    #[test]
    fn test_function_introspection() {
        let func = Value::native("add", 2, |_| Ok(Value::Unit));
        assert_eq!(get(&func, &"name".into()).unwrap(), Value::string("add"));
        assert_eq!(get(&func, &"length".into()).unwrap(), Value::I64(2));
        assert_eq!(get(&func, &"other".into()).unwrap(), Value::Unit);
    }

    #[test]
    fn test_own_keys_per_shape() {
        let obj = sample_object();
        assert_eq!(own_keys(&obj).unwrap(), vec![PropKey::from("v")]);

        let arr = Value::array(vec![Value::I64(1)]);
        assert_eq!(
            own_keys(&arr).unwrap(),
            vec![PropKey::Index(0), PropKey::from("length")]
        );
    }

    #[test]
    fn test_apply_and_construct() {
        let add = Value::native("add", 2, |args| {
            let a = args[0].as_i64().unwrap_or(0);
            let b = args[1].as_i64().unwrap_or(0);
            Ok(Value::I64(a + b))
        });

        assert_eq!(
            apply(&add, &[Value::I64(1), Value::I64(2)]).unwrap(),
            Value::I64(3)
        );

        // Construction boxes the primitive result
        let boxed = construct(&add, &[Value::I64(1), Value::I64(2)]).unwrap();
        let obj = boxed.as_object().expect("boxed object");
        assert_eq!(obj.get("value"), Some(Value::I64(3)));
    }

    #[test]
    fn test_apply_non_callable() {
        let err = apply(&sample_object(), &[]).unwrap_err();
        assert!(matches!(err, WraithError::TypeError { .. }));
    }

    #[test]
    fn test_array_structural_defaults() {
        let target = sample_object();
        assert_eq!(array_own_keys(&target).unwrap(), vec![PropKey::from("length")]);

        let length = array_descriptor(&target, &"length".into()).unwrap();
        assert_eq!(length, Some(PropertyDescriptor::synthetic_length()));

        // Non-length keys fall through to the real machinery
        let real = array_descriptor(&target, &"v".into()).unwrap();
        assert_eq!(real, Some(PropertyDescriptor::data(Value::I64(42))));
        assert_eq!(array_descriptor(&target, &"nope".into()).unwrap(), None);
    }

    #[test]
    fn test_primitive_targets_are_rejected() {
        let prim = Value::I64(1);
        assert!(get(&prim, &"x".into()).is_err());
        assert!(own_keys(&prim).is_err());
        assert!(descriptor(&prim, &"x".into()).is_err());
    }
}
