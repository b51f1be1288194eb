//! Kiln Standard Library
//!
//! The `kiln.core` native library: numeric, comparison, and character
//! primitives bound through symbol manifests.

#![warn(missing_docs)]

pub mod chars;
pub mod core;
pub mod numeric;

pub use crate::core::{open, CoreLibrary, SONAME};
