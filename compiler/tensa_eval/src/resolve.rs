//! Name resolution against the merged environment.
//!
//! The merged view is the run's scope overlaid by the runtime environment:
//! when both bind a name, the runtime binding wins. Misses are not issues.
//! They are logged and recovered with the identity function (for callables)
//! or the absent value (for references).

use tensa_runtime::RuntimeEnvironment;
use tensa_value::{NativeFunction, Value};

use crate::{LocalScope, Scope};

/// Runtime first, then the scope chain.
pub(crate) fn lookup(
    name: &str,
    scope: &LocalScope<Scope>,
    runtime: &RuntimeEnvironment,
) -> Option<Value> {
    runtime.get(name).or_else(|| scope.borrow().lookup(name))
}

/// A callable for `name`, or identity when nothing is bound.
pub(crate) fn resolve_function(
    name: &str,
    scope: &LocalScope<Scope>,
    runtime: &RuntimeEnvironment,
) -> Value {
    lookup(name, scope, runtime).unwrap_or_else(|| missing(name, runtime))
}

/// A capability from the runtime environment only.
///
/// `None` means the operator table had no entry; that also degrades to
/// identity.
pub(crate) fn resolve_runtime(name: Option<&str>, runtime: &RuntimeEnvironment) -> Value {
    match name {
        Some(name) => runtime.get(name).unwrap_or_else(|| missing(name, runtime)),
        None => identity(),
    }
}

fn missing(name: &str, runtime: &RuntimeEnvironment) -> Value {
    tracing::warn!(name, "function not found; using identity");
    tracing::debug!(available = ?runtime.names(), "runtime environment");
    identity()
}

pub(crate) fn identity() -> Value {
    Value::function(NativeFunction::new("identity", Ok))
}
