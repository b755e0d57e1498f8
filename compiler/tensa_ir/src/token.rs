//! Syntax tree nodes.
//!
//! A [`Token`] is one node of the parsed expression tree. The set of kinds is
//! closed, except for [`TokenKind::Unrecognized`], which keeps trees from a
//! newer parser evaluable.

use std::fmt;

use crate::Span;

/// Error when a tensor literal's data does not fill its shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TensorLiteralError {
    pub expected: usize,
    pub found: usize,
}

impl fmt::Display for TensorLiteralError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tensor literal shape needs {} elements, found {}",
            self.expected, self.found
        )
    }
}

impl std::error::Error for TensorLiteralError {}

/// Dense, row-major tensor literal as produced by the parser.
///
/// A rank-0 literal (empty shape) holds exactly one element.
#[derive(Clone, Debug, PartialEq)]
pub struct TensorLiteral {
    shape: Vec<usize>,
    data: Vec<f64>,
}

impl TensorLiteral {
    pub fn new(shape: Vec<usize>, data: Vec<f64>) -> Result<Self, TensorLiteralError> {
        let expected = shape.iter().product::<usize>();
        if expected != data.len() {
            return Err(TensorLiteralError {
                expected,
                found: data.len(),
            });
        }
        Ok(TensorLiteral { shape, data })
    }

    pub fn scalar(value: f64) -> Self {
        TensorLiteral {
            shape: Vec::new(),
            data: vec![value],
        }
    }

    pub fn vector(data: Vec<f64>) -> Self {
        TensorLiteral {
            shape: vec![data.len()],
            data,
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }
}

/// One node of the syntax tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

/// Node kinds, each with its kind-specific children.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// Top-level sequence of bindings.
    Program(Vec<Token>),
    /// `path = value`
    Assignment { path: Box<Token>, value: Box<Token> },
    /// Symbol lookup; the child evaluates to the name.
    Reference(Box<Token>),
    /// Name segments, flattened into a single key when evaluated.
    Path(Vec<String>),
    /// Single-parameter closure definition.
    Function { argument: String, body: Box<Token> },
    /// Call a named function on one argument.
    FunctionApplication {
        function_name: String,
        argument: Box<Token>,
    },
    /// Pipeline of named functions, applied right-to-left.
    FunctionComposition(Vec<String>),
    BinaryOperation {
        operator: String,
        left: Box<Token>,
        right: Box<Token>,
    },
    UnaryOperation {
        operator: String,
        operand: Box<Token>,
    },
    /// Coerce the child into a tensor.
    ImplicitConversion(Box<Token>),
    Tensor(TensorLiteral),
    /// Structural literal. Evaluates to its wrapped value for now.
    Object(Box<Token>),
    /// A kind this tree model does not know, kept with its raw tag.
    Unrecognized(String),
}

impl TokenKind {
    /// The kind tag as the parser spells it.
    pub fn tag(&self) -> &str {
        match self {
            TokenKind::Program(_) => "Program",
            TokenKind::Assignment { .. } => "Assignment",
            TokenKind::Reference(_) => "Reference",
            TokenKind::Path(_) => "Path",
            TokenKind::Function { .. } => "Function",
            TokenKind::FunctionApplication { .. } => "FunctionApplication",
            TokenKind::FunctionComposition(_) => "FunctionComposition",
            TokenKind::BinaryOperation { .. } => "BinaryOperation",
            TokenKind::UnaryOperation { .. } => "UnaryOperation",
            TokenKind::ImplicitConversion(_) => "ImplicitConversion",
            TokenKind::Tensor(_) => "Tensor",
            TokenKind::Object(_) => "Object",
            TokenKind::Unrecognized(tag) => tag,
        }
    }
}

// Constructors for hand-built trees. All of them use `Span::DUMMY`; chain
// `with_span` when positions matter.
impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn program(assignments: Vec<Token>) -> Self {
        Self::new(TokenKind::Program(assignments), Span::DUMMY)
    }

    /// `name = value` with a one-segment path.
    pub fn assignment(name: &str, value: Token) -> Self {
        Self::new(
            TokenKind::Assignment {
                path: Box::new(Self::path(&[name])),
                value: Box::new(value),
            },
            Span::DUMMY,
        )
    }

    pub fn path(segments: &[&str]) -> Self {
        Self::new(
            TokenKind::Path(segments.iter().map(ToString::to_string).collect()),
            Span::DUMMY,
        )
    }

    /// Reference to a one-segment path.
    pub fn reference(name: &str) -> Self {
        Self::new(TokenKind::Reference(Box::new(Self::path(&[name]))), Span::DUMMY)
    }

    pub fn function(argument: &str, body: Token) -> Self {
        Self::new(
            TokenKind::Function {
                argument: argument.to_string(),
                body: Box::new(body),
            },
            Span::DUMMY,
        )
    }

    pub fn application(function_name: &str, argument: Token) -> Self {
        Self::new(
            TokenKind::FunctionApplication {
                function_name: function_name.to_string(),
                argument: Box::new(argument),
            },
            Span::DUMMY,
        )
    }

    pub fn composition(names: &[&str]) -> Self {
        Self::new(
            TokenKind::FunctionComposition(names.iter().map(ToString::to_string).collect()),
            Span::DUMMY,
        )
    }

    pub fn binary(operator: &str, left: Token, right: Token) -> Self {
        Self::new(
            TokenKind::BinaryOperation {
                operator: operator.to_string(),
                left: Box::new(left),
                right: Box::new(right),
            },
            Span::DUMMY,
        )
    }

    pub fn unary(operator: &str, operand: Token) -> Self {
        Self::new(
            TokenKind::UnaryOperation {
                operator: operator.to_string(),
                operand: Box::new(operand),
            },
            Span::DUMMY,
        )
    }

    pub fn implicit_conversion(value: Token) -> Self {
        Self::new(TokenKind::ImplicitConversion(Box::new(value)), Span::DUMMY)
    }

    pub fn tensor(literal: TensorLiteral) -> Self {
        Self::new(TokenKind::Tensor(literal), Span::DUMMY)
    }

    pub fn scalar(value: f64) -> Self {
        Self::tensor(TensorLiteral::scalar(value))
    }

    pub fn object(value: Token) -> Self {
        Self::new(TokenKind::Object(Box::new(value)), Span::DUMMY)
    }

    pub fn unrecognized(tag: &str) -> Self {
        Self::new(TokenKind::Unrecognized(tag.to_string()), Span::DUMMY)
    }
}
