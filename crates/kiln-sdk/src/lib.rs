//! Kiln SDK - Lightweight SDK for writing native libraries
//!
//! This crate provides the value model, the call context trait, and the error
//! types a native library needs, without depending on the dispatch engine.
//!
//! # Example
//!
//! ```ignore
//! use kiln_sdk::{unbox_integer, AbiResult, NativeValue};
//!
//! fn add(args: &[NativeValue]) -> AbiResult<NativeValue> {
//!     let a = unbox_integer(&args[0])?;
//!     let b = unbox_integer(&args[1])?;
//!     Ok(NativeValue::integer(a.wrapping_add(b)))
//! }
//! ```

#![warn(missing_docs)]

pub mod context;
pub mod convert;
pub mod error;
pub mod value;

pub use context::{NativeContext, NullContext};
pub use convert::{
    unbox_bool, unbox_char, unbox_f32, unbox_f64, unbox_integer, unbox_long, FromNative,
    ToNative,
};
pub use error::{AbiResult, CallResult, NativeError, StructuredError, TraceFrame};
pub use value::{
    box_bool, box_char, box_char_code, box_f32, box_f64, box_integer, box_long, init_box_cache,
    Boxed, BoxedValue, NativeValue, CHARACTER_CACHE_HIGH, INTEGER_CACHE_HIGH, INTEGER_CACHE_LOW,
};
