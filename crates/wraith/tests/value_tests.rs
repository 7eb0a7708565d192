//! Tests for the Value type and its payloads

use pretty_assertions::assert_eq;
use wraith::*;

#[test]
fn test_primitive_values() {
    assert_eq!(Value::Unit, Value::Unit);

    assert_eq!(Value::Bool(true), Value::Bool(true));
    assert_ne!(Value::Bool(true), Value::Bool(false));

    assert_eq!(Value::I64(42), Value::I64(42));
    assert_ne!(Value::I64(42), Value::I64(43));

    assert_eq!(Value::F64(1.5), Value::F64(1.5));

    // Different tiers are never equal
    assert_ne!(Value::I64(0), Value::Unit);
}

#[test]
fn test_string_values() {
    let s1 = Value::string("hello");
    let s2 = Value::string("hello");
    let s3 = Value::string("world");

    assert_eq!(s1, s2);
    assert_ne!(s1, s3);
    assert_eq!(s1.as_str(), Some("hello"));
}

#[test]
fn test_object_values() {
    let o1 = Value::object(
        ObjectValue::new()
            .with_prop("x", Value::I64(10))
            .with_prop("y", Value::I64(20)),
    );
    let o2 = Value::object(
        ObjectValue::new()
            .with_prop("x", Value::I64(10))
            .with_prop("y", Value::I64(20)),
    );

    // Structural equality across distinct allocations
    assert_eq!(o1, o2);

    let obj = o1.as_object().unwrap();
    assert_eq!(obj.get("x"), Some(Value::I64(10)));
    assert_eq!(obj.get("z"), None);
}

#[test]
fn test_array_values() {
    let a1 = Value::array(vec![Value::I64(1), Value::I64(2)]);
    let a2 = Value::array(vec![Value::I64(1), Value::I64(2)]);
    let a3 = Value::array(vec![Value::I64(1)]);

    assert_eq!(a1, a2);
    assert_ne!(a1, a3);
}

#[test]
fn test_function_values_compare_by_identity() {
    let f1 = Value::native("id", 1, |args| Ok(args[0].clone()));
    let f2 = Value::native("id", 1, |args| Ok(args[0].clone()));

    assert_ne!(f1, f2);
    assert_eq!(f1, f1.clone());
}

#[test]
fn test_predicates() {
    assert!(Value::Unit.is_unit());
    assert!(Value::Bool(false).is_bool());
    assert!(Value::I64(1).is_numeric());
    assert!(Value::F64(1.0).is_numeric());
    assert!(Value::string("s").is_string());
    assert!(Value::object(ObjectValue::new()).is_object());
    assert!(Value::array(vec![]).is_array());
    assert!(Value::native("f", 0, |_| Ok(Value::Unit)).is_callable());

    assert!(!Value::array(vec![]).is_callable());
    assert!(!Value::object(ObjectValue::new()).is_array());
}

#[test]
fn test_extractors() {
    assert_eq!(Value::Bool(true).as_bool(), Some(true));
    assert_eq!(Value::I64(7).as_i64(), Some(7));
    assert_eq!(Value::I64(7).as_usize(), Some(7));
    assert_eq!(Value::I64(-1).as_usize(), None);
    assert_eq!(Value::I64(2).as_f64(), Some(2.0));
    assert_eq!(Value::string("x").as_i64(), None);
}

#[test]
fn test_from_conversions() {
    assert_eq!(Value::from(true), Value::Bool(true));
    assert_eq!(Value::from(42i64), Value::I64(42));
    assert_eq!(Value::from(1.5f64), Value::F64(1.5));
    assert_eq!(Value::from("s"), Value::string("s"));
    assert_eq!(Value::from("s".to_string()), Value::string("s"));
}

#[test]
fn test_shared_mutation_through_clones() {
    let original = Value::object(ObjectValue::new());
    let alias = original.clone();

    original.as_object().unwrap().set("k", Value::I64(1));
    assert_eq!(alias.as_object().unwrap().get("k"), Some(Value::I64(1)));
}
