//! Callable values.
//!
//! Everything invocable (native capabilities, user closures, compositions)
//! implements [`Callable`]. Invocation threads a [`CallContext`] so that a
//! closure evaluating its body can record issues into the run that called it.

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use tensa_diagnostic::Diagnostics;

use crate::{InvokeError, InvokeResult, Value};

/// Per-run state handed to every invocation.
pub struct CallContext<'a> {
    /// Issues of the current evaluation run.
    pub diagnostics: &'a mut Diagnostics,
    depth: usize,
    max_depth: Option<usize>,
}

impl<'a> CallContext<'a> {
    /// `max_depth` of `None` means closure calls may nest without limit.
    pub fn new(diagnostics: &'a mut Diagnostics, max_depth: Option<usize>) -> Self {
        CallContext {
            diagnostics,
            depth: 0,
            max_depth,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Enter one level of closure nesting. On error the depth is unchanged.
    pub fn enter(&mut self) -> Result<(), InvokeError> {
        if let Some(max_depth) = self.max_depth {
            if self.depth >= max_depth {
                return Err(InvokeError::RecursionLimit { max_depth });
            }
        }
        self.depth += 1;
        Ok(())
    }

    pub fn exit(&mut self) {
        debug_assert!(self.depth > 0, "CallContext::exit() without enter()");
        self.depth = self.depth.saturating_sub(1);
    }
}

/// Something that can be applied to one argument.
pub trait Callable {
    /// Display name, used in messages and logs.
    fn name(&self) -> &str;

    fn call(&self, arg: Value, cx: &mut CallContext<'_>) -> InvokeResult;
}

/// Shared handle to a callable.
#[derive(Clone)]
pub struct Function(Rc<dyn Callable>);

impl Function {
    pub fn new(callable: impl Callable + 'static) -> Self {
        Function(Rc::new(callable))
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    pub fn call(&self, arg: Value, cx: &mut CallContext<'_>) -> InvokeResult {
        self.0.call(arg, cx)
    }

    /// Whether both handles point at the same callable.
    pub fn ptr_eq(&self, other: &Function) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function({})", self.name())
    }
}

/// Signature of a native capability body.
pub type NativeFn = dyn Fn(Value) -> InvokeResult + Send + Sync;

/// A named capability implemented in Rust.
///
/// Cheap to clone and safe to share across threads; the runtime
/// environment stores these and hands out [`Function`] handles on lookup.
#[derive(Clone)]
pub struct NativeFunction {
    name: Arc<str>,
    body: Arc<NativeFn>,
}

impl NativeFunction {
    pub fn new(
        name: impl Into<Arc<str>>,
        body: impl Fn(Value) -> InvokeResult + Send + Sync + 'static,
    ) -> Self {
        NativeFunction {
            name: name.into(),
            body: Arc::new(body),
        }
    }

    pub fn invoke(&self, arg: Value) -> InvokeResult {
        (self.body)(arg)
    }
}

impl Callable for NativeFunction {
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, arg: Value, _cx: &mut CallContext<'_>) -> InvokeResult {
        self.invoke(arg)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeFunction({})", self.name)
    }
}

impl From<NativeFunction> for Function {
    fn from(native: NativeFunction) -> Self {
        Function::new(native)
    }
}
