//! Finalization registry: observing reclamation through tokens

use std::sync::{Arc, Mutex};

use wraith::*;

fn collecting_registry() -> (FinalizationRegistry, Arc<Mutex<Vec<Value>>>) {
    let gone = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&gone);
    let registry = FinalizationRegistry::new(move |token| {
        sink.lock().unwrap().push(token);
    });
    (registry, gone)
}

#[test]
fn test_no_delivery_while_targets_live() {
    let (registry, gone) = collecting_registry();
    let target = Value::object(ObjectValue::new());

    registry.register(&target, Value::I64(1)).unwrap();
    assert_eq!(registry.len(), 1);

    assert_eq!(registry.cleanup(), 0);
    assert!(gone.lock().unwrap().is_empty());
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_tokens_delivered_once_per_reclaimed_target() {
    let (registry, gone) = collecting_registry();

    let obj = Value::object(ObjectValue::new());
    let arr = Value::array(vec![]);
    let func = Value::native("f", 0, |_| Ok(Value::Unit));

    registry.register(&obj, Value::I64(1)).unwrap();
    registry.register(&arr, Value::I64(2)).unwrap();
    registry.register(&func, Value::I64(3)).unwrap();

    drop(obj);
    drop(arr);
    drop(func);

    assert_eq!(registry.cleanup(), 3);
    assert!(registry.is_empty());

    let mut tokens: Vec<i64> = gone
        .lock()
        .unwrap()
        .iter()
        .filter_map(Value::as_i64)
        .collect();
    tokens.sort_unstable();
    assert_eq!(tokens, vec![1, 2, 3]);

    // Nothing left to fire
    assert_eq!(registry.cleanup(), 0);
    assert_eq!(gone.lock().unwrap().len(), 3);
}

#[test]
fn test_partial_reclamation_only_fires_dead_entries() {
    let (registry, gone) = collecting_registry();

    let keep = Value::object(ObjectValue::new());
    let lose = Value::object(ObjectValue::new());

    registry.register(&keep, Value::string("keep")).unwrap();
    registry.register(&lose, Value::string("lose")).unwrap();

    drop(lose);

    assert_eq!(registry.cleanup(), 1);
    assert_eq!(registry.len(), 1);
    assert_eq!(gone.lock().unwrap().as_slice(), &[Value::string("lose")]);

    drop(keep);
    assert_eq!(registry.cleanup(), 1);
    assert!(registry.is_empty());
}

#[test]
fn test_registration_never_keeps_the_target_alive() {
    let (registry, _gone) = collecting_registry();
    let target = Value::array(vec![Value::I64(1)]);
    let weak = target.downgrade().unwrap();

    registry.register(&target, Value::Unit).unwrap();
    drop(target);

    assert!(!weak.is_live());
}

#[test]
fn test_primitive_targets_are_rejected() {
    let (registry, _gone) = collecting_registry();
    assert!(registry.register(&Value::I64(1), Value::Unit).is_err());
    assert!(registry.is_empty());
}

#[test]
fn test_registry_alongside_carriers() {
    let (registry, gone) = collecting_registry();
    let handler = Arc::new(Handler::new());

    let target = Value::object(ObjectValue::new().with_prop("v", Value::I64(42)));
    let carrier = create(&target, &handler, None).unwrap();
    registry.register(&target, Value::string("observed")).unwrap();

    assert_eq!(carrier.get("v").unwrap(), Value::I64(42));

    drop(target);

    // Both observation paths agree: the carrier raises, the registry fires
    assert!(matches!(carrier.get("v"), Err(WraithError::Reclaimed(_))));
    assert_eq!(registry.cleanup(), 1);
    assert_eq!(
        gone.lock().unwrap().as_slice(),
        &[Value::string("observed")]
    );
}
