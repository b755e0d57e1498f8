//! Diagnostics produced while evaluating a Tensa tree.
//!
//! An [`Issue`] is shaped for an editor renderer: 1-based line/column span,
//! message, severity. [`Diagnostics`] is the ordered collection one
//! evaluation run appends to. Issues are never thrown; evaluation keeps going.

mod issue;
pub mod source_map;

pub use issue::{Diagnostics, Issue, Severity};
pub use source_map::SourceMap;
