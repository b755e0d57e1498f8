use std::sync::Arc;

use tensa_diagnostic::{Severity, SourceMap};
use tensa_runtime::RuntimeEnvironment;

use super::Interpreter;
use crate::evaluator::EvalContext;

/// Closure nesting allowed before a call fails with a recursion error.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 256;

/// Builder for [`Interpreter`].
///
/// Only the runtime environment is required. Defaults: no source text
/// (issues are positioned on line 1 by byte offset), a call depth limit of
/// [`DEFAULT_MAX_CALL_DEPTH`], and issues reported as errors.
pub struct InterpreterBuilder {
    runtime: Arc<RuntimeEnvironment>,
    source: Option<SourceMap>,
    max_call_depth: Option<usize>,
    severity: Severity,
}

impl InterpreterBuilder {
    pub fn new(runtime: Arc<RuntimeEnvironment>) -> Self {
        Self {
            runtime,
            source: None,
            max_call_depth: Some(DEFAULT_MAX_CALL_DEPTH),
            severity: Severity::Error,
        }
    }

    /// Source text the tree was parsed from, for line/column positions.
    #[must_use]
    pub fn source(mut self, text: &str) -> Self {
        self.source = Some(SourceMap::new(text));
        self
    }

    /// Maximum closure nesting. `None` removes the limit.
    #[must_use]
    pub fn max_call_depth(mut self, depth: Option<usize>) -> Self {
        self.max_call_depth = depth;
        self
    }

    /// Severity given to issues from failed invocations.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn build(self) -> Interpreter {
        Interpreter {
            context: EvalContext {
                runtime: self.runtime,
                source: Arc::new(self.source.unwrap_or_default()),
                severity: self.severity,
            },
            max_call_depth: self.max_call_depth,
        }
    }
}
