//! Numeric primitive implementations
//!
//! Binary operations promote their operands first:
//! - any Float32/Float64 operand: both become f64
//! - else any Long operand: both become i64
//! - else (Integer/Character): both stay i32, arithmetic wraps

use std::cmp::Ordering;

use kiln_sdk::{
    box_f64, box_integer, box_long, unbox_bool, AbiResult, BoxedValue, NativeError, NativeValue,
};

/// Operand pair after promotion
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Operands {
    Int(i32, i32),
    Long(i64, i64),
    Double(f64, f64),
}

fn number(value: &NativeValue) -> AbiResult<BoxedValue> {
    value
        .as_boxed()
        .map(|b| b.value())
        .ok_or_else(|| NativeError::type_mismatch("number", value.type_name()))
}

fn as_f64(v: BoxedValue) -> f64 {
    match v {
        BoxedValue::Integer(i) => i as f64,
        BoxedValue::Character(c) => c as f64,
        BoxedValue::Long(l) => l as f64,
        BoxedValue::Float32(f) => f as f64,
        BoxedValue::Float64(f) => f,
    }
}

fn as_i64(v: BoxedValue) -> i64 {
    match v {
        BoxedValue::Integer(i) => i as i64,
        BoxedValue::Character(c) => c as i64,
        BoxedValue::Long(l) => l,
        BoxedValue::Float32(f) => f as i64,
        BoxedValue::Float64(f) => f as i64,
    }
}

fn is_float(v: BoxedValue) -> bool {
    matches!(v, BoxedValue::Float32(_) | BoxedValue::Float64(_))
}

pub(crate) fn promote(a: &NativeValue, b: &NativeValue) -> AbiResult<Operands> {
    let (a, b) = (number(a)?, number(b)?);
    if is_float(a) || is_float(b) {
        Ok(Operands::Double(as_f64(a), as_f64(b)))
    } else if matches!(a, BoxedValue::Long(_)) || matches!(b, BoxedValue::Long(_)) {
        Ok(Operands::Long(as_i64(a), as_i64(b)))
    } else {
        // Both are Integer or Character here.
        Ok(Operands::Int(as_i64(a) as i32, as_i64(b) as i32))
    }
}

fn division_by_zero() -> NativeError {
    NativeError::ArgumentError("division by zero".to_string())
}

/// Sum of two numbers
pub fn add(a: &NativeValue, b: &NativeValue) -> AbiResult<NativeValue> {
    Ok(match promote(a, b)? {
        Operands::Int(x, y) => box_integer(x.wrapping_add(y)),
        Operands::Long(x, y) => box_long(x.wrapping_add(y)),
        Operands::Double(x, y) => box_f64(x + y),
    }
    .into())
}

/// Difference of two numbers
pub fn sub(a: &NativeValue, b: &NativeValue) -> AbiResult<NativeValue> {
    Ok(match promote(a, b)? {
        Operands::Int(x, y) => box_integer(x.wrapping_sub(y)),
        Operands::Long(x, y) => box_long(x.wrapping_sub(y)),
        Operands::Double(x, y) => box_f64(x - y),
    }
    .into())
}

/// Product of two numbers
pub fn mul(a: &NativeValue, b: &NativeValue) -> AbiResult<NativeValue> {
    Ok(match promote(a, b)? {
        Operands::Int(x, y) => box_integer(x.wrapping_mul(y)),
        Operands::Long(x, y) => box_long(x.wrapping_mul(y)),
        Operands::Double(x, y) => box_f64(x * y),
    }
    .into())
}

/// Quotient; integer division by zero is an argument error
pub fn div(a: &NativeValue, b: &NativeValue) -> AbiResult<NativeValue> {
    Ok(match promote(a, b)? {
        Operands::Int(_, 0) | Operands::Long(_, 0) => return Err(division_by_zero()),
        Operands::Int(x, y) => box_integer(x.wrapping_div(y)),
        Operands::Long(x, y) => box_long(x.wrapping_div(y)),
        Operands::Double(x, y) => box_f64(x / y),
    }
    .into())
}

/// Remainder; integer remainder by zero is an argument error
pub fn rem(a: &NativeValue, b: &NativeValue) -> AbiResult<NativeValue> {
    Ok(match promote(a, b)? {
        Operands::Int(_, 0) | Operands::Long(_, 0) => return Err(division_by_zero()),
        Operands::Int(x, y) => box_integer(x.wrapping_rem(y)),
        Operands::Long(x, y) => box_long(x.wrapping_rem(y)),
        Operands::Double(x, y) => box_f64(x % y),
    }
    .into())
}

/// Negation, keeping the operand's width (characters negate as integers)
pub fn neg(a: &NativeValue) -> AbiResult<NativeValue> {
    Ok(match number(a)? {
        BoxedValue::Integer(i) => NativeValue::integer(i.wrapping_neg()),
        BoxedValue::Character(c) => NativeValue::integer(-(c as i32)),
        BoxedValue::Long(l) => NativeValue::long(l.wrapping_neg()),
        BoxedValue::Float32(f) => NativeValue::f32(-f),
        BoxedValue::Float64(f) => NativeValue::f64(-f),
    })
}

/// Logical not over integer truthiness
pub fn not(a: &NativeValue) -> AbiResult<NativeValue> {
    Ok(NativeValue::bool(!unbox_bool(a)?))
}

fn compare(a: &NativeValue, b: &NativeValue) -> AbiResult<Option<Ordering>> {
    Ok(match promote(a, b)? {
        Operands::Int(x, y) => Some(x.cmp(&y)),
        Operands::Long(x, y) => Some(x.cmp(&y)),
        Operands::Double(x, y) => x.partial_cmp(&y),
    })
}

/// Equality: numeric after promotion, otherwise by value
pub fn eq(a: &NativeValue, b: &NativeValue) -> AbiResult<NativeValue> {
    let equal = match (a, b) {
        (NativeValue::Boxed(_), NativeValue::Boxed(_)) => compare(a, b)? == Some(Ordering::Equal),
        _ => a == b,
    };
    Ok(NativeValue::bool(equal))
}

/// Less-than after promotion; NaN compares false
pub fn lt(a: &NativeValue, b: &NativeValue) -> AbiResult<NativeValue> {
    Ok(NativeValue::bool(compare(a, b)? == Some(Ordering::Less)))
}

/// Larger of two numbers, in the promoted type
pub fn max(a: &NativeValue, b: &NativeValue) -> AbiResult<NativeValue> {
    Ok(match promote(a, b)? {
        Operands::Int(x, y) => box_integer(x.max(y)),
        Operands::Long(x, y) => box_long(x.max(y)),
        Operands::Double(x, y) => box_f64(x.max(y)),
    }
    .into())
}

/// Smaller of two numbers, in the promoted type
pub fn min(a: &NativeValue, b: &NativeValue) -> AbiResult<NativeValue> {
    Ok(match promote(a, b)? {
        Operands::Int(x, y) => box_integer(x.min(y)),
        Operands::Long(x, y) => box_long(x.min(y)),
        Operands::Double(x, y) => box_f64(x.min(y)),
    }
    .into())
}
