use tensa_value::{CallContext, Callable, Function, InvokeResult, Value};

use crate::invoke::call_value;

/// Pipeline of resolved functions, applied last to first.
///
/// `[f, g, h]` called on `x` is `f(g(h(x)))`. The empty pipeline is the
/// identity. The first failing stage fails the whole call.
#[derive(Debug)]
pub struct Composition {
    stages: Vec<Value>,
}

impl Composition {
    pub fn new(stages: Vec<Value>) -> Self {
        Composition { stages }
    }

}

impl From<Composition> for Function {
    fn from(composition: Composition) -> Self {
        Function::new(composition)
    }
}

impl Callable for Composition {
    fn name(&self) -> &str {
        "composition"
    }

    fn call(&self, arg: Value, cx: &mut CallContext<'_>) -> InvokeResult {
        self.stages
            .iter()
            .rev()
            .try_fold(arg, |acc, stage| call_value(stage, acc, cx))
    }
}
