//! The `kiln.core` native library
//!
//! Handlers are held in one table indexed by dispatch index. The symbol names
//! come from two manifest fragments that are loaded in order, so the table
//! must list `core.symbols` entries first and then `chars.symbols` entries.

use std::sync::Arc;

use kiln_engine::vm::symbols::load_str;
use kiln_engine::{LoadError, LoadedLibrary, NativeLibrary};
use kiln_sdk::{AbiResult, NativeContext, NativeError, NativeValue};

use crate::{chars, numeric};

/// Shared-object name of the core library
pub const SONAME: &str = "kiln.core";

/// Arithmetic and comparison manifest
pub const CORE_MANIFEST: &str = include_str!("../natives/core.symbols");

/// Character and conversion manifest
pub const CHARS_MANIFEST: &str = include_str!("../natives/chars.symbols");

type Primitive = fn(&dyn NativeContext, &[NativeValue]) -> AbiResult<NativeValue>;

fn unary(
    name: &str,
    args: &[NativeValue],
    f: fn(&NativeValue) -> AbiResult<NativeValue>,
) -> AbiResult<NativeValue> {
    match args {
        [a] => f(a),
        _ => Err(NativeError::arity(name, 1, args.len())),
    }
}

fn binary(
    name: &str,
    args: &[NativeValue],
    f: fn(&NativeValue, &NativeValue) -> AbiResult<NativeValue>,
) -> AbiResult<NativeValue> {
    match args {
        [a, b] => f(a, b),
        _ => Err(NativeError::arity(name, 2, args.len())),
    }
}

macro_rules! primitives {
    ($($arity:ident $module:ident::$name:ident),* $(,)?) => {
        &[$(
            (stringify!($name), {
                fn handler(_ctx: &dyn NativeContext, args: &[NativeValue]) -> AbiResult<NativeValue> {
                    $arity(stringify!($name), args, $module::$name)
                }
                handler as Primitive
            }),
        )*]
    };
}

/// Handler table in dispatch-index order
pub(crate) const PRIMITIVES: &[(&str, Primitive)] = primitives![
    // core.symbols
    binary numeric::add,
    binary numeric::sub,
    binary numeric::mul,
    binary numeric::div,
    binary numeric::rem,
    unary numeric::neg,
    unary numeric::not,
    binary numeric::eq,
    binary numeric::lt,
    binary numeric::max,
    binary numeric::min,
    // chars.symbols
    unary chars::char_code,
    unary chars::from_char_code,
    unary chars::is_digit,
    unary chars::to_long,
    unary chars::to_double,
    unary chars::to_string,
];

/// Native library backing the core primitives
#[derive(Debug, Default, Clone, Copy)]
pub struct CoreLibrary;

impl NativeLibrary for CoreLibrary {
    fn soname(&self) -> &str {
        SONAME
    }

    fn invoke(
        &self,
        index: u32,
        ctx: &dyn NativeContext,
        args: &[NativeValue],
    ) -> AbiResult<NativeValue> {
        match PRIMITIVES.get(index as usize) {
            Some((_, handler)) => handler(ctx, args),
            None => Err(NativeError::UnknownIndex {
                soname: SONAME.to_string(),
                index,
            }),
        }
    }
}

/// Create the core library and load both manifests into it
pub fn open() -> Result<Arc<LoadedLibrary>, LoadError> {
    let library = LoadedLibrary::new(CoreLibrary);
    let core = load_str(&library, CORE_MANIFEST)?;
    let chars = load_str(&library, CHARS_MANIFEST)?;
    log::debug!("{}: opened with {} + {} symbols", SONAME, core, chars);
    Ok(library)
}
