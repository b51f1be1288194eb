//! Argument literals for `kiln call`.
//!
//! | form     | value         |
//! |----------|---------------|
//! | `42`     | Integer       |
//! | `42L`    | LongInteger   |
//! | `1.5`    | Float64       |
//! | `1.5f`   | Float32       |
//! | `'a'`    | Character     |
//! | `"text"` | String        |
//! | `null`   | Null          |
//!
//! [`format`] prints values back in the same syntax.

use anyhow::{anyhow, bail, Context};
use kiln_sdk::{BoxedValue, NativeValue};

/// Parse one command-line literal
pub fn parse(text: &str) -> anyhow::Result<NativeValue> {
    if text == "null" {
        return Ok(NativeValue::null());
    }

    if let Some(inner) = quoted(text, '"') {
        return Ok(NativeValue::string(inner));
    }

    if let Some(inner) = quoted(text, '\'') {
        let mut chars = inner.chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            bail!("character literal {} must hold exactly one character", text);
        };
        let code = u16::try_from(c as u32)
            .map_err(|_| anyhow!("character {} does not fit in one code unit", text))?;
        return Ok(NativeValue::character(code));
    }

    if let Some(digits) = text.strip_suffix('L') {
        let l = digits
            .parse::<i64>()
            .with_context(|| format!("invalid long literal: {}", text))?;
        return Ok(NativeValue::long(l));
    }

    if let Some(digits) = text.strip_suffix('f') {
        let f = digits
            .parse::<f32>()
            .with_context(|| format!("invalid float literal: {}", text))?;
        return Ok(NativeValue::f32(f));
    }

    if text.contains(['.', 'e', 'E']) {
        let f = text
            .parse::<f64>()
            .with_context(|| format!("invalid double literal: {}", text))?;
        return Ok(NativeValue::f64(f));
    }

    let i = text
        .parse::<i32>()
        .with_context(|| format!("invalid integer literal: {}", text))?;
    Ok(NativeValue::integer(i))
}

fn quoted(text: &str, quote: char) -> Option<&str> {
    text.strip_prefix(quote)?.strip_suffix(quote)
}

/// Render a value in literal syntax
pub fn format(value: &NativeValue) -> String {
    match value {
        NativeValue::Null => "null".to_string(),
        NativeValue::String(s) => format!("\"{}\"", s),
        NativeValue::Boxed(b) => match b.value() {
            BoxedValue::Integer(i) => i.to_string(),
            BoxedValue::Long(l) => format!("{}L", l),
            BoxedValue::Float32(f) => format!("{:?}f", f),
            BoxedValue::Float64(f) => format!("{:?}", f),
            BoxedValue::Character(_) => format!("'{}'", b),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse("42").unwrap(), NativeValue::integer(42));
        assert_eq!(parse("-7").unwrap(), NativeValue::integer(-7));
        assert_eq!(parse("42L").unwrap(), NativeValue::long(42));
        assert_eq!(parse("1.5").unwrap(), NativeValue::f64(1.5));
        assert_eq!(parse("1e3").unwrap(), NativeValue::f64(1000.0));
        assert_eq!(parse("1.5f").unwrap(), NativeValue::f32(1.5));
    }

    #[test]
    fn test_parse_text_forms() {
        assert_eq!(parse("null").unwrap(), NativeValue::null());
        assert_eq!(parse("'a'").unwrap(), NativeValue::character(97));
        assert_eq!(parse("\"hi there\"").unwrap(), NativeValue::string("hi there"));
        assert_eq!(parse("\"\"").unwrap(), NativeValue::string(""));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(parse("").is_err());
        assert!(parse("abc").is_err());
        assert!(parse("'ab'").is_err());
        assert!(parse("''").is_err());
        assert!(parse("3000000000").is_err());
        assert!(parse("'\u{1F600}'").is_err());
    }

    #[test]
    fn test_format_matches_parse() {
        for text in ["42", "42L", "1.5", "2.0", "0.25f", "'z'", "\"x\"", "null"] {
            assert_eq!(format(&parse(text).unwrap()), text);
        }
    }
}
