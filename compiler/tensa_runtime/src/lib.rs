//! Runtime environment for the Tensa evaluator.
//!
//! The evaluator never computes anything numeric itself. Every operator,
//! conversion and named function is looked up here by name and invoked as
//! an opaque capability. [`RuntimeEnvironment::standard`] provides the
//! tensor library; embedders and tests build their own tables with
//! [`RuntimeEnvironment::builder`].
//!
//! A runtime environment is immutable once built and is `Send + Sync`, so
//! one table can serve evaluation runs on many threads.

mod convert;
mod environment;
mod standard;

pub use convert::{pair_args, tensor_arg, to_native};
pub use environment::{RuntimeBinding, RuntimeBuilder, RuntimeEnvironment};
