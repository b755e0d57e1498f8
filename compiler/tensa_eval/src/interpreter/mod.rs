//! The evaluation entry point.
//!
//! An [`Interpreter`] is configuration only: the runtime environment, the
//! source map used to position issues, and limits. Every call to
//! [`Interpreter::interpret`] is an independent run with its own
//! [`Environment`] and issue list, so one interpreter can be reused and
//! two runs over the same tree produce identical results.

mod builder;

use std::future::{ready, Ready};
use std::sync::Arc;

use tensa_diagnostic::{Diagnostics, Issue};
use tensa_ir::Token;
use tensa_runtime::RuntimeEnvironment;
use tensa_value::{CallContext, Value};

use crate::evaluator::{EvalContext, Evaluator};
use crate::Environment;

pub use builder::{InterpreterBuilder, DEFAULT_MAX_CALL_DEPTH};

/// Outcome of one run.
#[derive(Debug)]
pub struct Interpretation {
    /// Value of the root token. A record of bindings for a program.
    pub result: Value,
    /// Failed invocations, in evaluation order.
    pub issues: Vec<Issue>,
    /// Bindings the run assigned.
    pub state: Environment,
}

/// Evaluates syntax trees against a runtime environment.
#[derive(Clone, Debug)]
pub struct Interpreter {
    context: EvalContext,
    max_call_depth: Option<usize>,
}

impl Interpreter {
    /// An interpreter with default settings over `runtime`.
    pub fn new(runtime: Arc<RuntimeEnvironment>) -> Self {
        InterpreterBuilder::new(runtime).build()
    }

    pub fn builder(runtime: Arc<RuntimeEnvironment>) -> InterpreterBuilder {
        InterpreterBuilder::new(runtime)
    }

    pub fn runtime(&self) -> &RuntimeEnvironment {
        &self.context.runtime
    }

    pub fn max_call_depth(&self) -> Option<usize> {
        self.max_call_depth
    }

    /// Evaluate `root` in a fresh environment.
    ///
    /// Never fails: failed calls are reported in `issues` and leave
    /// `Value::Error` at the failing node.
    #[tracing::instrument(level = "debug", skip_all, fields(kind = root.kind.tag()))]
    pub fn interpret(&self, root: &Token) -> Interpretation {
        let state = Environment::new();
        let mut diagnostics = Diagnostics::new();
        let result = {
            let mut cx = CallContext::new(&mut diagnostics, self.max_call_depth);
            Evaluator::new(&self.context, state.frames(), state.scope()).eval(root, &mut cx)
        };
        tracing::debug!(
            issues = diagnostics.len(),
            live_frames = state.frames().live(),
            "interpretation finished"
        );
        Interpretation {
            result,
            issues: diagnostics.into_vec(),
            state,
        }
    }

    /// [`Interpreter::interpret`] as an already-completed future.
    pub fn interpret_deferred(&self, root: &Token) -> Ready<Interpretation> {
        ready(self.interpret(root))
    }
}
