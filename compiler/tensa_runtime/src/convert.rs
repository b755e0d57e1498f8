//! Argument coercion shared by the standard capabilities.

use std::rc::Rc;

use tensa_value::{InvokeError, Tensor, TensorError, Value};

/// Read a capability argument as a tensor.
///
/// Numbers become scalars and rectangular nested lists are packed
/// row-major. Anything else is a type mismatch.
pub fn tensor_arg(value: &Value) -> Result<Rc<Tensor>, InvokeError> {
    match value {
        Value::Tensor(t) => Ok(Rc::clone(t)),
        Value::Number(n) => Ok(Rc::new(Tensor::scalar(*n))),
        Value::List(items) => Ok(Rc::new(from_nested(items)?)),
        other => Err(InvokeError::TypeMismatch {
            expected: "tensor",
            got: other.type_name(),
        }),
    }
}

/// Split the `{a, b}` record binary capabilities receive.
pub fn pair_args(value: &Value) -> Result<(&Value, &Value), InvokeError> {
    let Value::Record(record) = value else {
        return Err(InvokeError::TypeMismatch {
            expected: "record",
            got: value.type_name(),
        });
    };
    let a = record.get("a").ok_or(InvokeError::MissingField { field: "a" })?;
    let b = record.get("b").ok_or(InvokeError::MissingField { field: "b" })?;
    Ok((a, b))
}

/// Native form of a tensor: a number for rank 0, nested lists otherwise.
pub fn to_native(tensor: &Tensor) -> Value {
    match tensor.as_scalar() {
        Some(n) => Value::Number(n),
        None => native_axis(tensor, 0, 0),
    }
}

fn native_axis(tensor: &Tensor, axis: usize, offset: usize) -> Value {
    let shape = tensor.shape();
    let stride: usize = shape[axis + 1..].iter().product();
    let items = (0..shape[axis])
        .map(|i| {
            let start = offset + i * stride;
            if axis + 1 == shape.len() {
                Value::Number(tensor.data()[start])
            } else {
                native_axis(tensor, axis + 1, start)
            }
        })
        .collect();
    Value::list(items)
}

fn from_nested(items: &[Value]) -> Result<Tensor, InvokeError> {
    // The first element at each depth fixes the shape; everything else
    // must agree with it. Until then the shape is only a guess.
    let mut shape = vec![items.len()];
    let mut first = items;
    while let Some(Value::List(inner)) = first.first() {
        shape.push(inner.len());
        first = inner;
    }

    let mut data = Vec::new();
    flatten(items, &shape, &mut data)?;
    Ok(Tensor::new(shape, data)?)
}

fn flatten(items: &[Value], shape: &[usize], data: &mut Vec<f64>) -> Result<(), InvokeError> {
    let Some((&len, rest)) = shape.split_first() else {
        return Err(TensorError::Ragged.into());
    };
    if items.len() != len {
        return Err(TensorError::Ragged.into());
    }
    for item in items {
        match item {
            Value::Number(n) if rest.is_empty() => data.push(*n),
            Value::List(inner) if !rest.is_empty() => flatten(inner, rest, data)?,
            Value::Number(_) | Value::List(_) => return Err(TensorError::Ragged.into()),
            other => {
                return Err(InvokeError::TypeMismatch {
                    expected: "number",
                    got: other.type_name(),
                })
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tensa_value::Record;

    fn nums(ns: &[f64]) -> Value {
        Value::list(ns.iter().copied().map(Value::Number).collect())
    }

    #[test]
    fn test_tensor_arg_from_number() {
        assert_eq!(*tensor_arg(&Value::Number(2.0)).unwrap(), Tensor::scalar(2.0));
    }

    #[test]
    fn test_tensor_arg_from_nested_list() {
        let value = Value::list(vec![nums(&[1.0, 2.0]), nums(&[3.0, 4.0])]);
        let t = tensor_arg(&value).unwrap();
        assert_eq!(t.shape(), &[2, 2]);
        assert_eq!(t.data(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_tensor_arg_rejects_ragged() {
        let value = Value::list(vec![nums(&[1.0, 2.0]), nums(&[3.0])]);
        assert_eq!(tensor_arg(&value), Err(InvokeError::Tensor(TensorError::Ragged)));

        let mixed = Value::list(vec![Value::Number(1.0), nums(&[2.0])]);
        assert_eq!(tensor_arg(&mixed), Err(InvokeError::Tensor(TensorError::Ragged)));
    }

    #[test]
    fn test_tensor_arg_rejects_deep_ragged() {
        let mut value = nums(&[0.0; 10]);
        for _ in 0..19 {
            let mut level = vec![Value::Number(0.0); 10];
            level[0] = value;
            value = Value::list(level);
        }
        assert_eq!(tensor_arg(&value), Err(InvokeError::Tensor(TensorError::Ragged)));
    }

    #[test]
    fn test_tensor_arg_rejects_strings() {
        assert_eq!(
            tensor_arg(&Value::string("x")),
            Err(InvokeError::TypeMismatch {
                expected: "tensor",
                got: "string"
            })
        );
    }

    #[test]
    fn test_to_native_round_trips_nesting() {
        let value = Value::list(vec![nums(&[1.0, 2.0]), nums(&[3.0, 4.0])]);
        let t = tensor_arg(&value).unwrap();
        assert_eq!(to_native(&t), value);
        assert_eq!(to_native(&Tensor::scalar(5.0)), Value::Number(5.0));
    }

    #[test]
    fn test_pair_args_missing_field() {
        let only_a = Value::record(Record::single("a", Value::Number(1.0)));
        assert_eq!(pair_args(&only_a), Err(InvokeError::MissingField { field: "b" }));
        assert_eq!(
            pair_args(&Value::Number(1.0)),
            Err(InvokeError::TypeMismatch {
                expected: "record",
                got: "number"
            })
        );
    }
}
