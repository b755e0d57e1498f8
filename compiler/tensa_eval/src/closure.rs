use std::rc::Rc;

use tensa_ir::Token;
use tensa_value::{CallContext, Callable, Function, InvokeResult, Value};

use crate::environment::Frames;
use crate::evaluator::{EvalContext, Evaluator};
use crate::{LocalScope, Scope};

/// A user function: one parameter, a body, and the scope it was written in.
///
/// Each call evaluates the body in a fresh child of the captured scope with
/// the parameter bound, so assignments made to the captured scope after
/// creation are visible inside.
pub struct Closure {
    argument: String,
    body: Rc<Token>,
    captured: LocalScope<Scope>,
    frames: Frames,
    context: EvalContext,
}

impl Closure {
    pub(crate) fn new(
        argument: String,
        body: Rc<Token>,
        captured: LocalScope<Scope>,
        frames: Frames,
        context: EvalContext,
    ) -> Self {
        Closure {
            argument,
            body,
            captured,
            frames,
            context,
        }
    }
}

impl From<Closure> for Function {
    fn from(closure: Closure) -> Self {
        Function::new(closure)
    }
}

impl Callable for Closure {
    fn name(&self) -> &str {
        "closure"
    }

    #[tracing::instrument(level = "trace", skip_all, fields(argument = %self.argument))]
    fn call(&self, arg: Value, cx: &mut CallContext<'_>) -> InvokeResult {
        cx.enter()?;
        let frame = self.frames.push(&self.captured);
        frame.borrow_mut().define(self.argument.as_str(), arg);
        let result = Evaluator::new(&self.context, &self.frames, frame).eval(&self.body, cx);
        cx.exit();
        Ok(result)
    }
}

impl std::fmt::Debug for Closure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Closure")
            .field("argument", &self.argument)
            .field("body", &self.body.kind.tag())
            .finish_non_exhaustive()
    }
}
