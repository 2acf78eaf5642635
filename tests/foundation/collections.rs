//! Integration tests for persistent collections
//!
//! Tests LtVec and LtMap with structural sharing and immutability.

use std::sync::Arc;

use vigil_foundation::Value;
use vigil_foundation::collections::{LtMap, LtVec};

// =============================================================================
// LtVec
// =============================================================================

#[test]
fn vector_empty() {
    let v: LtVec<Value> = LtVec::new();
    assert!(v.is_empty());
    assert_eq!(v.len(), 0);
    assert!(v.get(0).is_none());
}

#[test]
fn vector_immutability() {
    let v1 = LtVec::new().push_back(Value::Int(1));
    let v2 = v1.push_back(Value::Int(2));

    assert_eq!(v1.len(), 1);
    assert_eq!(v2.len(), 2);
}

#[test]
fn vector_update_in_bounds_only() {
    let v = LtVec::new().push_back(Value::Int(1)).push_back(Value::Int(2));

    let updated = v.update(1, Value::Int(20)).unwrap();
    assert_eq!(updated.get(1), Some(&Value::Int(20)));
    assert_eq!(v.get(1), Some(&Value::Int(2)));
    assert!(v.update(2, Value::Int(3)).is_none());
}

#[test]
fn vector_pop_back() {
    let mut v = LtVec::new();
    for i in 0..100 {
        v = v.push_back(Value::Int(i));
    }

    let (rest, last) = v.pop_back().unwrap();
    assert_eq!(last, Value::Int(99));
    assert_eq!(rest.len(), 99);
    assert_eq!(v.len(), 100);
}

#[test]
fn vector_iteration_order() {
    let v: LtVec<Value> = (1..=3).map(Value::Int).collect();
    let items: Vec<_> = v.iter().cloned().collect();
    assert_eq!(items, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);

    let mut count = 0;
    for _ in &v {
        count += 1;
    }
    assert_eq!(count, 3);
}

// =============================================================================
// LtMap
// =============================================================================

#[test]
fn map_insert_get() {
    let m: LtMap<Arc<str>, Value> = LtMap::new()
        .insert("a".into(), Value::Int(1))
        .insert("b".into(), Value::Int(2));

    assert_eq!(m.get("a"), Some(&Value::Int(1)));
    assert_eq!(m.get("b"), Some(&Value::Int(2)));
    assert_eq!(m.get("c"), None);
}

#[test]
fn map_remove_leaves_original() {
    let m1: LtMap<Arc<str>, Value> = LtMap::new().insert("a".into(), Value::Int(1));
    let m2 = m1.remove("a");

    assert!(m1.get("a").is_some());
    assert!(m2.get("a").is_none());
    assert!(m2.is_empty());
}

#[test]
fn map_enumerates_in_key_order() {
    let m: LtMap<Arc<str>, Value> = [("zeta", 1), ("alpha", 2), ("mid", 3)]
        .into_iter()
        .map(|(k, v)| (Arc::from(k), Value::Int(v)))
        .collect();

    let entries: Vec<(&str, &Value)> = m.iter().map(|(k, v)| (&**k, v)).collect();
    assert_eq!(
        entries,
        vec![
            ("alpha", &Value::Int(2)),
            ("mid", &Value::Int(3)),
            ("zeta", &Value::Int(1)),
        ]
    );
}

#[test]
fn map_equality_ignores_insertion_order() {
    let a: LtMap<Arc<str>, Value> = LtMap::new()
        .insert("x".into(), Value::Int(1))
        .insert("y".into(), Value::Int(2));
    let b: LtMap<Arc<str>, Value> = LtMap::new()
        .insert("y".into(), Value::Int(2))
        .insert("x".into(), Value::Int(1));

    assert_eq!(a, b);
}
