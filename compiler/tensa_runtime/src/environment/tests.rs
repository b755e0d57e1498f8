use super::*;
use pretty_assertions::assert_eq;
use tensa_diagnostic::Diagnostics;
use tensa_value::{CallContext, InvokeError};

#[test]
fn test_empty_misses() {
    let env = RuntimeEnvironment::empty();
    assert!(env.is_empty());
    assert_eq!(env.get("Add"), None);
    assert!(!env.contains("Add"));
}

#[test]
fn test_builder_defines_functions_and_constants() {
    let env = RuntimeEnvironment::builder()
        .function("double", "Doubles a number.", |v| match v {
            Value::Number(n) => Ok(Value::Number(n * 2.0)),
            other => Err(InvokeError::TypeMismatch {
                expected: "number",
                got: other.type_name(),
            }),
        })
        .constant("x", "Two.", Tensor::scalar(2.0))
        .build();

    assert_eq!(env.names(), vec!["double", "x"]);
    assert_eq!(env.doc("double"), Some("Doubles a number."));
    assert_eq!(env.get("x"), Some(Value::tensor(Tensor::scalar(2.0))));

    let Some(Value::Function(double)) = env.get("double") else {
        panic!("double should be a function");
    };
    let mut diagnostics = Diagnostics::new();
    let mut cx = CallContext::new(&mut diagnostics, None);
    assert_eq!(double.call(Value::Number(3.0), &mut cx), Ok(Value::Number(6.0)));
}

#[test]
fn test_later_definition_overrides() {
    let mut env = RuntimeEnvironment::standard();
    assert!(env.contains("PI"));
    env.define_constant("PI", "Three.", Tensor::scalar(3.0));
    assert_eq!(env.get("PI"), Some(Value::tensor(Tensor::scalar(3.0))));
    assert_eq!(env.doc("PI"), Some("Three."));
}

#[test]
fn test_with_standard_then_override() {
    let env = RuntimeEnvironment::builder()
        .with_standard()
        .constant("E", "Not quite.", Tensor::scalar(2.0))
        .build();
    assert!(env.contains("Add"));
    assert_eq!(env.get("E"), Some(Value::tensor(Tensor::scalar(2.0))));
}

#[test]
fn test_environment_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RuntimeEnvironment>();
}
