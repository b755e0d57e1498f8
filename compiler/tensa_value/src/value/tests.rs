use super::*;
use crate::NativeFunction;
use pretty_assertions::assert_eq;

#[test]
fn test_display() {
    assert_eq!(Value::Absent.to_string(), "null");
    assert_eq!(Value::Error.to_string(), "ERROR");
    assert_eq!(Value::Number(3.0).to_string(), "3");
    assert_eq!(Value::string("a/b").to_string(), "a/b");
    assert_eq!(
        Value::list(vec![Value::Number(1.0), Value::list(vec![Value::Number(2.0)])]).to_string(),
        "[1, [2]]"
    );
    assert_eq!(
        Value::pair(Value::Number(1.0), Value::Number(2.0)).to_string(),
        "{a: 1, b: 2}"
    );
    let f = Value::function(NativeFunction::new("Add", Ok));
    assert_eq!(f.to_string(), "<function Add>");
}

#[test]
fn test_type_names() {
    assert_eq!(Value::Absent.type_name(), "absent");
    assert_eq!(Value::tensor(Tensor::scalar(1.0)).type_name(), "tensor");
    assert_eq!(Value::record(Record::new()).type_name(), "record");
    assert_eq!(Value::Error.type_name(), "error");
}

#[test]
fn test_structural_equality() {
    assert_eq!(
        Value::tensor(Tensor::vector(vec![1.0, 2.0])),
        Value::tensor(Tensor::vector(vec![1.0, 2.0]))
    );
    assert_ne!(Value::Number(1.0), Value::tensor(Tensor::scalar(1.0)));
    assert_ne!(Value::Absent, Value::Error);
}

#[test]
fn test_functions_compare_by_identity() {
    let f = Value::function(NativeFunction::new("id", Ok));
    let same = f.clone();
    let other = Value::function(NativeFunction::new("id", Ok));
    assert_eq!(f, same);
    assert_ne!(f, other);
}

#[test]
fn test_pair_fields() {
    let pair = Value::pair(Value::Number(1.0), Value::string("x"));
    let record = pair.as_record();
    assert_eq!(record.and_then(|r| r.get("a")), Some(&Value::Number(1.0)));
    assert_eq!(record.and_then(|r| r.get("b")), Some(&Value::string("x")));
    assert_eq!(record.map(Record::len), Some(2));
}
