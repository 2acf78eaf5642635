//! Integration tests for Value
//!
//! Tests construction, type sniffing, equality, and display.

use vigil_foundation::{Type, Value};

// =============================================================================
// Construction
// =============================================================================

#[test]
fn value_from_primitives() {
    assert_eq!(Value::from(true), Value::Bool(true));
    assert_eq!(Value::from(7i64), Value::Int(7));
    assert_eq!(Value::from(7i32), Value::Int(7));
    assert_eq!(Value::from(1.5), Value::Float(1.5));
    assert_eq!(Value::from("s").as_str(), Some("s"));
    assert_eq!(Value::from(String::from("s")).as_str(), Some("s"));
}

#[test]
fn value_map_builder() {
    let v = Value::map([("a", Value::Int(1)), ("b", Value::from("two"))]);
    let map = v.as_map().unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("b"), Some(&Value::from("two")));
}

#[test]
fn value_vec_builder() {
    let v = Value::vec(["x", "y"]);
    let items = v.as_vec().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items.get(1), Some(&Value::from("y")));
}

// =============================================================================
// Type Sniffing
// =============================================================================

#[test]
fn value_types() {
    assert_eq!(Value::Nil.value_type(), Type::Nil);
    assert_eq!(Value::Bool(true).value_type(), Type::Bool);
    assert_eq!(Value::Int(1).value_type(), Type::Int);
    assert_eq!(Value::Float(1.0).value_type(), Type::Float);
    assert_eq!(Value::from("a").value_type(), Type::String);
    assert_eq!(Value::vec([1]).value_type(), Type::Vec);
    assert_eq!(Value::map([("a", 1)]).value_type(), Type::Map);
}

#[test]
fn scalar_predicates_match_type() {
    let values = [
        Value::Nil,
        Value::Bool(true),
        Value::Int(1),
        Value::Float(1.0),
        Value::from("a"),
        Value::vec([1]),
        Value::map([("a", 1)]),
    ];
    for value in &values {
        assert_eq!(value.is_scalar(), value.value_type().is_scalar());
        assert_eq!(
            value.is_sequence() || value.is_keyed(),
            value.value_type().is_container()
        );
    }
}

#[test]
fn accessors_reject_other_types() {
    assert_eq!(Value::Int(1).as_bool(), None);
    assert_eq!(Value::Bool(true).as_int(), None);
    assert_eq!(Value::Int(1).as_float(), None);
    assert!(Value::Int(1).as_map().is_none());
    assert!(Value::Int(1).as_vec().is_none());
}

// =============================================================================
// Display
// =============================================================================

#[test]
fn display_nested() {
    let v = Value::map([("list", Value::vec([1, 2])), ("name", Value::from("n"))]);
    assert_eq!(v.to_string(), "{list [1 2], name n}");
}

#[test]
fn debug_quotes_strings() {
    assert_eq!(format!("{:?}", Value::from("a")), "\"a\"");
    assert_eq!(format!("{:?}", Value::Nil), "nil");
}
