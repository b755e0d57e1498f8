use std::fmt;
use std::rc::Rc;

use crate::{Function, Record, Tensor};

/// Runtime value produced by evaluation.
#[derive(Clone, Debug)]
pub enum Value {
    /// Result of an unresolved reference.
    Absent,
    Number(f64),
    /// Flattened path keys and placeholder text.
    Str(Rc<str>),
    Tensor(Rc<Tensor>),
    /// Native nested-list form of a tensor.
    List(Rc<[Value]>),
    Record(Rc<Record>),
    Function(Function),
    /// Sentinel left at a node whose invocation failed.
    Error,
}

// Factory methods
impl Value {
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::Str(s.into())
    }

    pub fn tensor(tensor: Tensor) -> Self {
        Value::Tensor(Rc::new(tensor))
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::List(items.into())
    }

    pub fn record(record: Record) -> Self {
        Value::Record(Rc::new(record))
    }

    pub fn function(function: impl Into<Function>) -> Self {
        Value::Function(function.into())
    }

    /// The `{a, b}` argument handed to binary operator functions.
    pub fn pair(a: Value, b: Value) -> Self {
        let mut record = Record::new();
        record.insert("a", a);
        record.insert("b", b);
        Value::record(record)
    }
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Absent => "absent",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Tensor(_) => "tensor",
            Value::List(_) => "list",
            Value::Record(_) => "record",
            Value::Function(_) => "function",
            Value::Error => "error",
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_tensor(&self) -> Option<&Tensor> {
        match self {
            Value::Tensor(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Value::Function(function)
    }
}

impl From<Tensor> for Value {
    fn from(tensor: Tensor) -> Self {
        Value::tensor(tensor)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

/// Structural equality; functions compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Absent, Value::Absent) | (Value::Error, Value::Error) => true,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Tensor(a), Value::Tensor(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => write!(f, "null"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Tensor(t) => write!(f, "{t}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Record(r) => write!(f, "{r}"),
            Value::Function(func) => write!(f, "<function {}>", func.name()),
            Value::Error => write!(f, "ERROR"),
        }
    }
}

#[cfg(test)]
mod tests;
