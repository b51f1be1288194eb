//! Boxing and unboxing helpers for primitive implementations.
//!
//! All conversions are pure. Unboxing widens losslessly and otherwise fails
//! with [`NativeError::TypeMismatch`]:
//!
//! | helper          | accepts                       |
//! |-----------------|-------------------------------|
//! | `unbox_integer` | Integer, Character            |
//! | `unbox_bool`    | Integer, Character (0 = false)|
//! | `unbox_char`    | Character                     |
//! | `unbox_long`    | Integer, Character, Long      |
//! | `unbox_f32`     | Float32                       |
//! | `unbox_f64`     | Integer, Float32, Float64     |

use crate::error::{AbiResult, NativeError};
use crate::value::{BoxedValue, NativeValue};

fn boxed(value: &NativeValue, expected: &str) -> AbiResult<BoxedValue> {
    value
        .as_boxed()
        .map(|b| b.value())
        .ok_or_else(|| NativeError::type_mismatch(expected, value.type_name()))
}

/// Unbox a 32-bit integer
pub fn unbox_integer(value: &NativeValue) -> AbiResult<i32> {
    let b = boxed(value, "int")?;
    b.as_integer()
        .ok_or_else(|| NativeError::type_mismatch("int", b.type_name()))
}

/// Unbox a boolean: zero is `false`, any other integer is `true`
pub fn unbox_bool(value: &NativeValue) -> AbiResult<bool> {
    let b = boxed(value, "bool")?;
    b.as_integer()
        .map(|i| i != 0)
        .ok_or_else(|| NativeError::type_mismatch("bool", b.type_name()))
}

/// Unbox a character code
pub fn unbox_char(value: &NativeValue) -> AbiResult<u16> {
    match boxed(value, "char")? {
        BoxedValue::Character(c) => Ok(c),
        other => Err(NativeError::type_mismatch("char", other.type_name())),
    }
}

/// Unbox a 64-bit integer
pub fn unbox_long(value: &NativeValue) -> AbiResult<i64> {
    match boxed(value, "long")? {
        BoxedValue::Long(l) => Ok(l),
        BoxedValue::Integer(i) => Ok(i as i64),
        BoxedValue::Character(c) => Ok(c as i64),
        other => Err(NativeError::type_mismatch("long", other.type_name())),
    }
}

/// Unbox a 32-bit float
pub fn unbox_f32(value: &NativeValue) -> AbiResult<f32> {
    match boxed(value, "f32")? {
        BoxedValue::Float32(f) => Ok(f),
        other => Err(NativeError::type_mismatch("f32", other.type_name())),
    }
}

/// Unbox a 64-bit float
pub fn unbox_f64(value: &NativeValue) -> AbiResult<f64> {
    match boxed(value, "f64")? {
        BoxedValue::Float64(f) => Ok(f),
        BoxedValue::Float32(f) => Ok(f as f64),
        BoxedValue::Integer(i) => Ok(i as f64),
        other => Err(NativeError::type_mismatch("f64", other.type_name())),
    }
}

// ============================================================================
// Value Conversion Traits
// ============================================================================

/// Convert from NativeValue to Rust type.
///
/// Implement this trait to allow your type to be received as a primitive argument.
pub trait FromNative: Sized {
    /// Convert from NativeValue, returning an error if the type doesn't match.
    fn from_native(value: &NativeValue) -> AbiResult<Self>;
}

/// Convert from Rust type to NativeValue.
///
/// Implement this trait to allow your type to be returned from a primitive.
pub trait ToNative {
    /// Convert to NativeValue.
    fn to_native(self) -> NativeValue;
}

macro_rules! impl_native_conversions {
    ($($ty:ty => $unbox:ident, $ctor:ident;)*) => {
        $(
            impl FromNative for $ty {
                fn from_native(value: &NativeValue) -> AbiResult<Self> {
                    $unbox(value)
                }
            }

            impl ToNative for $ty {
                fn to_native(self) -> NativeValue {
                    NativeValue::$ctor(self)
                }
            }
        )*
    };
}

impl_native_conversions! {
    i32 => unbox_integer, integer;
    bool => unbox_bool, bool;
    u16 => unbox_char, character;
    i64 => unbox_long, long;
    f32 => unbox_f32, f32;
    f64 => unbox_f64, f64;
}

impl FromNative for String {
    fn from_native(value: &NativeValue) -> AbiResult<Self> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| NativeError::type_mismatch("string", value.type_name()))
    }
}

impl ToNative for String {
    fn to_native(self) -> NativeValue {
        NativeValue::String(self.into())
    }
}

// Unit type (for primitives that return void)
impl ToNative for () {
    fn to_native(self) -> NativeValue {
        NativeValue::null()
    }
}
