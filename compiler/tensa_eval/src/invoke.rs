use tensa_diagnostic::Issue;
use tensa_ir::Span;
use tensa_value::{CallContext, InvokeError, InvokeResult, Value};

use crate::evaluator::EvalContext;

/// Call `callee` with `arg`. Non-function values are not callable.
pub(crate) fn call_value(callee: &Value, arg: Value, cx: &mut CallContext<'_>) -> InvokeResult {
    match callee {
        Value::Function(f) => f.call(arg, cx),
        other => Err(InvokeError::NotCallable {
            type_name: other.type_name(),
        }),
    }
}

/// Call `callee`, turning a failure into one issue at `span`.
///
/// A failed call yields [`Value::Error`] so evaluation of the surrounding
/// tree continues.
pub(crate) fn invoke(
    callee: &Value,
    arg: Value,
    span: Span,
    context: &EvalContext,
    cx: &mut CallContext<'_>,
) -> Value {
    match call_value(callee, arg, cx) {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!(%span, error = %err, "invocation failed");
            cx.diagnostics.push(Issue::at(
                span,
                &context.source,
                err.to_string(),
                context.severity,
            ));
            Value::Error
        }
    }
}
