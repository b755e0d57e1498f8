use rustc_hash::FxHashMap;
use tensa_value::{InvokeResult, NativeFunction, Tensor, Value};

use crate::standard;

/// What a runtime name is bound to.
#[derive(Clone, Debug)]
pub enum RuntimeBinding {
    Function(NativeFunction),
    Constant(Tensor),
}

impl RuntimeBinding {
    /// A fresh evaluator value for this binding.
    pub fn to_value(&self) -> Value {
        match self {
            RuntimeBinding::Function(native) => Value::function(native.clone()),
            RuntimeBinding::Constant(tensor) => Value::tensor(tensor.clone()),
        }
    }
}

#[derive(Clone, Debug)]
struct Entry {
    binding: RuntimeBinding,
    doc: Box<str>,
}

/// Read-only table from names to native capabilities and constants.
///
/// Lookups are by exact name. Each entry carries a one-line doc string
/// shown by `tensa doc`.
#[derive(Clone, Debug, Default)]
pub struct RuntimeEnvironment {
    entries: FxHashMap<Box<str>, Entry>,
}

impl RuntimeEnvironment {
    /// A table with nothing in it. Every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard tensor library.
    pub fn standard() -> Self {
        let mut env = Self::empty();
        standard::register(&mut env);
        env
    }

    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::default()
    }

    /// Bind `name` to a native function, replacing any previous binding.
    pub fn define_function(
        &mut self,
        name: &str,
        doc: &str,
        body: impl Fn(Value) -> InvokeResult + Send + Sync + 'static,
    ) {
        let native = NativeFunction::new(name, body);
        self.insert(name, doc, RuntimeBinding::Function(native));
    }

    /// Bind `name` to a constant tensor, replacing any previous binding.
    pub fn define_constant(&mut self, name: &str, doc: &str, value: Tensor) {
        self.insert(name, doc, RuntimeBinding::Constant(value));
    }

    fn insert(&mut self, name: &str, doc: &str, binding: RuntimeBinding) {
        let entry = Entry {
            binding,
            doc: doc.into(),
        };
        if self.entries.insert(name.into(), entry).is_some() {
            tracing::debug!(name, "runtime binding replaced");
        }
    }

    /// The value bound to `name`, if any.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.entries.get(name).map(|entry| entry.binding.to_value())
    }

    pub fn binding(&self, name: &str) -> Option<&RuntimeBinding> {
        self.entries.get(name).map(|entry| &entry.binding)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn doc(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|entry| &*entry.doc)
    }

    /// All bound names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(|k| &**k).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Chained construction of a [`RuntimeEnvironment`].
///
/// Starts empty; call [`RuntimeBuilder::with_standard`] first to extend or
/// override the standard library instead.
#[derive(Default)]
pub struct RuntimeBuilder {
    env: RuntimeEnvironment,
}

impl RuntimeBuilder {
    /// Add every standard capability. Later definitions override them.
    #[must_use]
    pub fn with_standard(mut self) -> Self {
        standard::register(&mut self.env);
        self
    }

    #[must_use]
    pub fn function(
        mut self,
        name: &str,
        doc: &str,
        body: impl Fn(Value) -> InvokeResult + Send + Sync + 'static,
    ) -> Self {
        self.env.define_function(name, doc, body);
        self
    }

    #[must_use]
    pub fn constant(mut self, name: &str, doc: &str, value: Tensor) -> Self {
        self.env.define_constant(name, doc, value);
        self
    }

    pub fn build(self) -> RuntimeEnvironment {
        self.env
    }
}

#[cfg(test)]
mod tests;
