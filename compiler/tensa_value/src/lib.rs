//! Runtime values for the Tensa evaluator.
//!
//! # Threading
//!
//! Values are single-threaded: heap variants use `Rc`, and a closure value
//! holds a reference-counted scope of the run that created it. One
//! evaluation run owns all of its values.
//!
//! Native functions are the exception. They are `Send + Sync` so a runtime
//! environment can be built once and shared by runs on different threads.

mod errors;
mod function;
mod record;
mod tensor;
mod value;

pub use errors::{InvokeError, TensorError};
pub use function::{CallContext, Callable, Function, NativeFn, NativeFunction};
pub use record::Record;
pub use tensor::Tensor;
pub use value::Value;

/// Result of invoking a callable.
pub type InvokeResult = Result<Value, InvokeError>;
