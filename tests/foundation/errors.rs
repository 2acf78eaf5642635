//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use vigil_foundation::{ContainerKind, Error, ErrorContext, ErrorKind, Type, Value};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_unclassifiable() {
    let err = Error::unclassifiable(Type::String);
    assert!(matches!(err.kind, ErrorKind::Unclassifiable(Type::String)));
    let msg = format!("{err}");
    assert!(msg.contains("string"));
    assert!(msg.contains("vec or map"));
}

#[test]
fn error_unsupported_key() {
    let err = Error::unsupported_key("\"name\"", "sequence");
    let msg = format!("{err}");
    assert!(msg.contains("name"));
    assert!(msg.contains("sequence"));
}

#[test]
fn error_index_out_of_bounds() {
    let err = Error::index_out_of_bounds(5, 2);
    if let ErrorKind::IndexOutOfBounds { index, length } = err.kind {
        assert_eq!(index, 5);
        assert_eq!(length, 2);
    } else {
        panic!("Expected IndexOutOfBounds");
    }
}

#[test]
fn error_missing_key() {
    let err = Error::missing_key();
    assert!(matches!(err.kind, ErrorKind::MissingKey));
    assert!(err.context.is_none());
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn context_frames_accumulate() {
    let ctx = ErrorContext::new()
        .with_source("inventory")
        .with_frame("push")
        .with_frame("set");

    assert_eq!(ctx.stack.len(), 2);
    let display = format!("{ctx}");
    assert!(display.contains("at inventory"));
    assert!(display.contains("in push"));
    assert!(display.contains("in set"));
}

#[test]
fn context_does_not_change_message() {
    let plain = format!("{}", Error::missing_key());
    let with_ctx = format!(
        "{}",
        Error::missing_key().with_context(ErrorContext::new().with_frame("pop"))
    );
    assert_eq!(plain, with_ctx);
}

// =============================================================================
// Classification
// =============================================================================

#[test]
fn classify_every_value_type() {
    let cases = [
        (Value::Nil, None),
        (Value::Bool(false), None),
        (Value::Int(0), None),
        (Value::Float(0.5), None),
        (Value::from(""), None),
        (Value::vec([1]), Some(ContainerKind::Sequence)),
        (Value::map([("a", 1)]), Some(ContainerKind::Keyed)),
    ];

    for (value, expected) in cases {
        let result = ContainerKind::classify(&value);
        match expected {
            Some(kind) => assert_eq!(result.unwrap(), kind),
            None => {
                let err = result.unwrap_err();
                assert!(matches!(err.kind, ErrorKind::Unclassifiable(t) if t == value.value_type()));
            }
        }
    }
}
