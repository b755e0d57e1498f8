//! Per-run bindings.
//!
//! An [`Environment`] owns the run's global [`Scope`]. Assignments write
//! there; closures capture the scope they were created in and evaluate
//! their bodies in a child scope holding the parameter.
//!
//! A closure bound in the scope it captured forms a reference cycle. The
//! environment keeps weak handles to every call frame of its run and empties
//! all of them, plus the global scope, when it is dropped.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::{Rc, Weak};

use tensa_value::{Record, Value};

/// Single-threaded shared cell for scopes.
///
/// All scope allocations go through [`LocalScope::new`]. Cloning shares the
/// same scope, which is how closures see assignments made after they were
/// created.
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    /// A handle that does not keep the scope alive.
    #[inline]
    pub fn downgrade(&self) -> Weak<RefCell<T>> {
        Rc::downgrade(&self.0)
    }

    /// Whether both handles share one scope.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Bindings of one scope plus a link to the enclosing one.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<String, Value>,
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Bind `name` in this scope. Rebinding overwrites.
    #[inline]
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    /// Look `name` up here, then in enclosing scopes.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.get(name) {
            return Some(value.clone());
        }
        if let Some(parent) = &self.parent {
            return parent.borrow().lookup(name);
        }
        None
    }

    /// Drop every binding of this scope, keeping the parent link.
    fn clear(&mut self) -> FxHashMap<String, Value> {
        std::mem::take(&mut self.bindings)
    }

    /// This scope's own bindings, sorted by name.
    pub fn own_bindings(&self) -> Vec<(&str, &Value)> {
        let mut entries: Vec<_> = self.bindings.iter().map(|(k, v)| (k.as_str(), v)).collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

/// Weak handles to the call frames created during one run.
#[derive(Clone, Debug, Default)]
pub(crate) struct Frames(Rc<RefCell<Vec<Weak<RefCell<Scope>>>>>);

impl Frames {
    /// Open a call frame below `parent`.
    pub fn push(&self, parent: &LocalScope<Scope>) -> LocalScope<Scope> {
        let frame = LocalScope::new(Scope::with_parent(parent.clone()));
        let mut frames = self.0.borrow_mut();
        if frames.len() == frames.capacity() {
            frames.retain(|f| f.strong_count() > 0);
        }
        frames.push(frame.downgrade());
        frame
    }

    /// Number of frames still alive.
    pub fn live(&self) -> usize {
        self.0.borrow().iter().filter(|f| f.strong_count() > 0).count()
    }

    fn clear(&self) {
        let frames = std::mem::take(&mut *self.0.borrow_mut());
        for frame in frames.iter().filter_map(Weak::upgrade) {
            // Release the borrow before the bindings drop.
            let bindings = frame.borrow_mut().clear();
            drop(bindings);
        }
    }
}

/// The mutable bindings of one evaluation run.
///
/// Returned as the `state` of an interpretation. Holds only what the run
/// assigned; runtime capabilities are not copied in. Dropping it empties
/// every scope of the run, so closures that outlive it see no bindings.
#[derive(Debug, Default)]
pub struct Environment {
    global: LocalScope<Scope>,
    frames: Frames,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the run's global scope.
    pub fn scope(&self) -> LocalScope<Scope> {
        self.global.clone()
    }

    pub(crate) fn frames(&self) -> &Frames {
        &self.frames
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.global.borrow().lookup(name)
    }

    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.global.borrow_mut().define(name, value);
    }

    pub fn len(&self) -> usize {
        self.global.borrow().bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.global.borrow().bindings.is_empty()
    }

    /// All bindings, sorted by name.
    pub fn to_record(&self) -> Record {
        let scope = self.global.borrow();
        let mut record = Record::new();
        for (name, value) in scope.own_bindings() {
            record.insert(name, value.clone());
        }
        record
    }
}

impl Drop for Environment {
    fn drop(&mut self) {
        self.frames.clear();
        let bindings = self.global.borrow_mut().clear();
        drop(bindings);
    }
}

#[cfg(test)]
mod tests;
