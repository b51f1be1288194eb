//! Kiln engine: the native-function bridge and call-dispatch core.
//!
//! - [`vm::symbols`] reads symbol manifests into a library's binding table
//! - [`vm::native_registry`] resolves names to index-bound callables
//! - [`vm::callable`] is the uniform invoke contract, including currying

pub mod vm;

pub use vm::{
    Callable, InterpretedFunction, LoadError, LoadedLibrary, NativeFunction, NativeLibrary,
    PartialApplication,
};
