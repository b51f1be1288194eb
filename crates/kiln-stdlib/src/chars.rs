//! Character and conversion primitives

use kiln_sdk::{
    box_char_code, unbox_char, unbox_f64, unbox_long, AbiResult, BoxedValue, NativeError,
    NativeValue,
};

/// Code unit of a character, as an integer
pub fn char_code(c: &NativeValue) -> AbiResult<NativeValue> {
    Ok(NativeValue::integer(unbox_char(c)? as i32))
}

/// Character for a code in `[0, 65536)`
pub fn from_char_code(code: &NativeValue) -> AbiResult<NativeValue> {
    Ok(box_char_code(unbox_long(code)?)?.into())
}

/// Whether a character is an ASCII decimal digit
pub fn is_digit(c: &NativeValue) -> AbiResult<NativeValue> {
    let code = unbox_char(c)?;
    Ok(NativeValue::bool((b'0' as u16..=b'9' as u16).contains(&code)))
}

/// Widen an integer or character to a long
pub fn to_long(n: &NativeValue) -> AbiResult<NativeValue> {
    Ok(NativeValue::long(unbox_long(n)?))
}

/// Convert any number to a 64-bit float
pub fn to_double(n: &NativeValue) -> AbiResult<NativeValue> {
    // Long and Character do not widen losslessly through unbox_f64.
    let value = match n.as_boxed().map(|b| b.value()) {
        Some(BoxedValue::Long(l)) => l as f64,
        Some(BoxedValue::Character(c)) => c as f64,
        Some(_) => unbox_f64(n)?,
        None => return Err(NativeError::type_mismatch("number", n.type_name())),
    };
    Ok(NativeValue::f64(value))
}

/// Printable form of any value
pub fn to_string(value: &NativeValue) -> AbiResult<NativeValue> {
    Ok(match value {
        NativeValue::Null => NativeValue::string("null"),
        NativeValue::Boxed(b) => NativeValue::string(&b.to_string()),
        NativeValue::String(_) => value.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_code_round_trip() {
        let a = NativeValue::character(b'a' as u16);
        assert_eq!(char_code(&a).unwrap(), NativeValue::integer(97));
        assert_eq!(from_char_code(&NativeValue::integer(97)).unwrap(), a);
    }

    #[test]
    fn test_from_char_code_range() {
        assert!(from_char_code(&NativeValue::integer(65535)).is_ok());
        assert_eq!(
            from_char_code(&NativeValue::long(65536)).unwrap_err(),
            NativeError::RangeError {
                what: "character code".to_string(),
                value: 65536
            }
        );
        assert!(from_char_code(&NativeValue::integer(-1)).is_err());
    }

    #[test]
    fn test_char_code_rejects_integer() {
        assert!(matches!(
            char_code(&NativeValue::integer(97)),
            Err(NativeError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_is_digit() {
        assert_eq!(
            is_digit(&NativeValue::character(b'7' as u16)).unwrap(),
            NativeValue::bool(true)
        );
        assert_eq!(
            is_digit(&NativeValue::character(b'x' as u16)).unwrap(),
            NativeValue::bool(false)
        );
    }

    #[test]
    fn test_widening_conversions() {
        assert_eq!(to_long(&NativeValue::integer(-5)).unwrap(), NativeValue::long(-5));
        assert_eq!(
            to_double(&NativeValue::long(1 << 40)).unwrap(),
            NativeValue::f64((1u64 << 40) as f64)
        );
        assert_eq!(to_double(&NativeValue::f32(0.5)).unwrap(), NativeValue::f64(0.5));
        assert!(to_double(&NativeValue::string("1")).is_err());
    }

    #[test]
    fn test_to_string() {
        assert_eq!(to_string(&NativeValue::integer(42)).unwrap(), NativeValue::string("42"));
        assert_eq!(to_string(&NativeValue::null()).unwrap(), NativeValue::string("null"));
        assert_eq!(
            to_string(&NativeValue::string("hi")).unwrap(),
            NativeValue::string("hi")
        );
    }
}
