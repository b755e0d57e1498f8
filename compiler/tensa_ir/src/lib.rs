//! Tensa IR - syntax tree types handed to the evaluator.
//!
//! The parser is an external collaborator. It produces a tree of [`Token`]s,
//! one variant per node kind, each carrying the byte [`Span`] it was parsed
//! from. Nothing in this crate evaluates anything.

mod span;
mod token;

pub use span::Span;
pub use token::{TensorLiteral, TensorLiteralError, Token, TokenKind};
