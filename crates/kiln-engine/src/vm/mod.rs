//! Native dispatch core
//!
//! Load time: [`symbols::load`] extends a [`LoadedLibrary`]'s binding table
//! from a manifest. Call time: [`LoadedLibrary::get_function`] hands out a
//! [`Callable`] bound to a dispatch index, which interpreted code may curry
//! and invoke.

pub mod callable;
pub mod defaults;
pub mod native_registry;
pub mod symbols;

pub use callable::{Callable, InterpretedFunction, NativeFunction, PartialApplication};
pub use native_registry::{LoadedLibrary, NativeLibrary};
pub use symbols::LoadError;

// Re-export SDK types for ease of use
pub use kiln_sdk::{
    AbiResult, CallResult, NativeContext, NativeError, NativeValue, StructuredError, TraceFrame,
};
