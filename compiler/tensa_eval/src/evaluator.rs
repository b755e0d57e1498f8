//! Dispatch over syntax tree nodes.

use std::rc::Rc;
use std::sync::Arc;

use tensa_diagnostic::{Severity, SourceMap};
use tensa_ir::{Token, TokenKind};
use tensa_runtime::RuntimeEnvironment;
use tensa_value::{CallContext, Record, Tensor, Value};

use crate::closure::Closure;
use crate::environment::Frames;
use crate::compose::Composition;
use crate::invoke::invoke;
use crate::operators::operator_function;
use crate::resolve::{lookup, resolve_function, resolve_runtime};
use crate::stack::ensure_sufficient_stack;
use crate::{LocalScope, Scope};

/// Capability names the evaluator invokes by itself.
const TENSOR_COERCION: &str = "Tensor";

/// Separator used when flattening a path into one key.
pub(crate) const PATH_SEPARATOR: &str = "/";

/// Run-independent settings shared by the evaluator and every closure it
/// creates.
#[derive(Clone, Debug)]
pub(crate) struct EvalContext {
    pub runtime: Arc<RuntimeEnvironment>,
    pub source: Arc<SourceMap>,
    pub severity: Severity,
}

/// Evaluates tokens against one scope.
pub(crate) struct Evaluator<'a> {
    context: &'a EvalContext,
    frames: &'a Frames,
    scope: LocalScope<Scope>,
}

impl<'a> Evaluator<'a> {
    pub fn new(context: &'a EvalContext, frames: &'a Frames, scope: LocalScope<Scope>) -> Self {
        Evaluator {
            context,
            frames,
            scope,
        }
    }

    pub fn eval(&self, token: &Token, cx: &mut CallContext<'_>) -> Value {
        ensure_sufficient_stack(|| self.eval_inner(token, cx))
    }

    fn eval_inner(&self, token: &Token, cx: &mut CallContext<'_>) -> Value {
        match &token.kind {
            TokenKind::Program(children) => self.eval_program(children, cx),
            TokenKind::Assignment { path, value } => {
                let key = self.eval_key(path, cx);
                let value = self.eval(value, cx);
                self.scope.borrow_mut().define(key.as_str(), value.clone());
                Value::record(Record::single(key, value))
            }
            TokenKind::Reference(name) => {
                let key = self.eval_key(name, cx);
                lookup(&key, &self.scope, &self.context.runtime).unwrap_or_else(|| {
                    tracing::warn!(name = %key, "unresolved reference");
                    Value::Absent
                })
            }
            TokenKind::Path(segments) => Value::string(segments.join(PATH_SEPARATOR)),
            TokenKind::Function { argument, body } => Value::function(Closure::new(
                argument.clone(),
                Rc::new(Token::clone(body)),
                self.scope.clone(),
                self.frames.clone(),
                self.context.clone(),
            )),
            TokenKind::FunctionApplication {
                function_name,
                argument,
            } => {
                let arg = self.eval(argument, cx);
                let function = resolve_function(function_name, &self.scope, &self.context.runtime);
                invoke(&function, arg, token.span, self.context, cx)
            }
            TokenKind::FunctionComposition(names) => {
                let stages = names
                    .iter()
                    .map(|name| resolve_function(name, &self.scope, &self.context.runtime))
                    .collect();
                Value::function(Composition::new(stages))
            }
            TokenKind::BinaryOperation {
                operator,
                left,
                right,
            } => {
                let a = self.eval(left, cx);
                let b = self.eval(right, cx);
                let function = self.operator(operator, 2);
                invoke(&function, Value::pair(a, b), token.span, self.context, cx)
            }
            TokenKind::UnaryOperation { operator, operand } => {
                let x = self.eval(operand, cx);
                let function = self.operator(operator, 1);
                invoke(&function, x, token.span, self.context, cx)
            }
            TokenKind::ImplicitConversion(value) => {
                let x = self.eval(value, cx);
                let function = resolve_runtime(Some(TENSOR_COERCION), &self.context.runtime);
                invoke(&function, x, token.span, self.context, cx)
            }
            TokenKind::Tensor(literal) => Value::tensor(Tensor::from(literal)),
            TokenKind::Object(value) => self.eval(value, cx),
            TokenKind::Unrecognized(tag) => Value::string(format!("Unrecognized token: {tag}")),
        }
    }

    /// Fold each child's single-entry record into one, later keys winning.
    fn eval_program(&self, children: &[Token], cx: &mut CallContext<'_>) -> Value {
        let mut aggregate = Record::new();
        for child in children {
            match self.eval(child, cx) {
                Value::Record(entry) => aggregate.extend_from(&entry),
                other => {
                    tracing::debug!(
                        kind = child.kind.tag(),
                        value = other.type_name(),
                        "program child produced no binding"
                    );
                }
            }
        }
        Value::record(aggregate)
    }

    /// The runtime capability for an operator. Unknown operators are identity.
    fn operator(&self, symbol: &str, arity: usize) -> Value {
        let name = operator_function(symbol, arity);
        if name.is_none() {
            tracing::warn!(operator = %symbol, arity, "unknown operator");
        }
        resolve_runtime(name, &self.context.runtime)
    }

    /// Evaluate a name expression to a flat key.
    fn eval_key(&self, token: &Token, cx: &mut CallContext<'_>) -> String {
        match self.eval(token, cx) {
            Value::Str(key) => key.to_string(),
            other => other.to_string(),
        }
    }
}
