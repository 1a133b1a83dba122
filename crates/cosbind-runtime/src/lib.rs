//! Cosine transforms exposed to an embedding interpreted host.
//!
//! Three entry points share one scalar cosine primitive and differ only in
//! how inputs and outputs are marshaled across the boundary: a scalar value,
//! an n-dimensional numeric buffer, and a string-keyed mapping. Each builtin
//! is registered by name so hosts can route calls through [`call_builtin`].

pub mod builtins;
pub mod dispatcher;

pub use cosbind_values::{BindError, BuiltinFunction, MapValue, Tensor, Type, Value};
pub use dispatcher::{builtin_names, call_builtin};

/// Result alias used by builtin implementations.
pub type BuiltinResult<T = Value> = Result<T, BindError>;
