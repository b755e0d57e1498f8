//! Failure types for foreign-function invocation.
//!
//! The `Display` text of an [`InvokeError`] becomes the message of the
//! issue recorded at the failing call site.

use thiserror::Error;

/// Shape and construction errors for dense tensors.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TensorError {
    #[error("shape {shape:?} needs {expected} elements, found {found}")]
    ShapeData {
        shape: Vec<usize>,
        expected: usize,
        found: usize,
    },
    #[error("nested lists have uneven lengths")]
    Ragged,
    #[error("incompatible shapes {left:?} and {right:?}")]
    Incompatible { left: Vec<usize>, right: Vec<usize> },
    #[error("expected a rank-{expected} tensor, got rank {found}")]
    Rank { expected: usize, found: usize },
    #[error("inner dimensions differ: {left} and {right}")]
    InnerDimension { left: usize, right: usize },
    #[error("tensor has no elements")]
    Empty,
}

/// Why a call failed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvokeError {
    #[error(transparent)]
    Tensor(#[from] TensorError),
    #[error("expected {expected}, got {got}")]
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
    },
    #[error("value of type {type_name} is not callable")]
    NotCallable { type_name: &'static str },
    #[error("argument has no field '{field}'")]
    MissingField { field: &'static str },
    #[error("maximum call depth of {max_depth} exceeded")]
    RecursionLimit { max_depth: usize },
    #[error("{0}")]
    Custom(String),
}

impl InvokeError {
    pub fn custom(message: impl Into<String>) -> Self {
        InvokeError::Custom(message.into())
    }
}
