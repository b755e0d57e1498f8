//! Tensa Eval - tree-walking evaluator for Tensa syntax trees.
//!
//! # Architecture
//!
//! - [`Interpreter`]: entry point; one `interpret` call is one run with a
//!   fresh [`Environment`] and a fresh issue list
//! - `Evaluator`: dispatch over `TokenKind`, one rule per node kind
//! - name resolution: the run's scope overlaid by the runtime environment,
//!   with the runtime winning on a clash
//! - [`operators`]: operator symbol and arity to capability name
//! - safe invocation: a failing call becomes one positioned [`Issue`] and
//!   the `Value::Error` sentinel, never an abort
//!
//! [`Issue`]: tensa_diagnostic::Issue

mod closure;
mod compose;
mod environment;
mod evaluator;
mod interpreter;
mod invoke;
pub mod operators;
mod resolve;
mod stack;

pub use closure::Closure;
pub use compose::Composition;
pub use environment::{Environment, LocalScope, Scope};
pub use interpreter::{Interpretation, Interpreter, InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};
pub use stack::ensure_sufficient_stack;

#[cfg(test)]
mod tests;
