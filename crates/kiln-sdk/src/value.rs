//! Boxed values and the native call-convention value
//!
//! Every numeric or character datum that crosses the native boundary travels
//! as a [`Boxed`] handle: a shared, immutable [`BoxedValue`]. Small integers
//! and characters are interned in a process-wide cache so hot values are not
//! reallocated on every call.
//!
//! # Interning
//!
//! ```text
//! Integer   [-128, 256)  one shared instance per value
//! Character [0, 256)     one shared instance per value
//! Long, Float32, Float64 never interned
//! ```
//!
//! Identity reuse is an allocation optimization only. `PartialEq` on both
//! [`BoxedValue`] and [`Boxed`] compares tag and value, never addresses.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::error::{AbiResult, NativeError};

/// Lowest interned integer (inclusive)
pub const INTEGER_CACHE_LOW: i32 = -128;

/// Highest interned integer (exclusive)
pub const INTEGER_CACHE_HIGH: i32 = 256;

/// Highest interned character code (exclusive)
pub const CHARACTER_CACHE_HIGH: u16 = 256;

// ============================================================================
// BoxedValue
// ============================================================================

/// Tagged numeric/character datum.
///
/// Booleans have no tag of their own: `true` is `Integer(1)` and `false` is
/// `Integer(0)`.
#[derive(Clone, Copy)]
pub enum BoxedValue {
    /// 32-bit signed integer
    Integer(i32),
    /// 16-bit unsigned character code
    Character(u16),
    /// 64-bit signed integer
    Long(i64),
    /// 32-bit float
    Float32(f32),
    /// 64-bit float
    Float64(f64),
}

impl BoxedValue {
    /// Integer view of this value.
    ///
    /// Characters widen to their code; other tags have no integer view.
    #[inline]
    pub const fn as_integer(&self) -> Option<i32> {
        match *self {
            BoxedValue::Integer(i) => Some(i),
            BoxedValue::Character(c) => Some(c as i32),
            _ => None,
        }
    }

    /// Character view of this value.
    ///
    /// Integers are truncated to their low 16 bits.
    #[inline]
    pub const fn as_character(&self) -> Option<u16> {
        match *self {
            BoxedValue::Character(c) => Some(c),
            BoxedValue::Integer(i) => Some(i as u16),
            _ => None,
        }
    }

    /// Get type name for diagnostics
    pub const fn type_name(&self) -> &'static str {
        match self {
            BoxedValue::Integer(_) => "int",
            BoxedValue::Character(_) => "char",
            BoxedValue::Long(_) => "long",
            BoxedValue::Float32(_) => "f32",
            BoxedValue::Float64(_) => "f64",
        }
    }
}

// Floats compare by bit pattern so that equality stays reflexive (NaN == NaN)
// and consistent with `Hash`.
impl PartialEq for BoxedValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (BoxedValue::Integer(a), BoxedValue::Integer(b)) => a == b,
            (BoxedValue::Character(a), BoxedValue::Character(b)) => a == b,
            (BoxedValue::Long(a), BoxedValue::Long(b)) => a == b,
            (BoxedValue::Float32(a), BoxedValue::Float32(b)) => a.to_bits() == b.to_bits(),
            (BoxedValue::Float64(a), BoxedValue::Float64(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for BoxedValue {}

impl Hash for BoxedValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match *self {
            BoxedValue::Integer(i) => i.hash(state),
            BoxedValue::Character(c) => c.hash(state),
            BoxedValue::Long(l) => l.hash(state),
            BoxedValue::Float32(f) => f.to_bits().hash(state),
            BoxedValue::Float64(f) => f.to_bits().hash(state),
        }
    }
}

impl fmt::Debug for BoxedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoxedValue::Integer(i) => write!(f, "Integer({})", i),
            BoxedValue::Character(c) => write!(f, "Character({:#06x})", c),
            BoxedValue::Long(l) => write!(f, "Long({})", l),
            BoxedValue::Float32(x) => write!(f, "Float32({})", x),
            BoxedValue::Float64(x) => write!(f, "Float64({})", x),
        }
    }
}

impl fmt::Display for BoxedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            BoxedValue::Integer(i) => write!(f, "{}", i),
            BoxedValue::Long(l) => write!(f, "{}", l),
            BoxedValue::Float32(x) => write!(f, "{}", x),
            BoxedValue::Float64(x) => write!(f, "{}", x),
            BoxedValue::Character(c) => match char::from_u32(c as u32) {
                Some(ch) => write!(f, "{}", ch),
                None => write!(f, "\\u{{{:04x}}}", c),
            },
        }
    }
}

// ============================================================================
// Boxed handle
// ============================================================================

/// Shared handle to an immutable [`BoxedValue`].
///
/// Cloning is a reference-count bump. Use [`Boxed::ptr_eq`] to observe
/// interning; use `==` for everything else.
#[derive(Clone)]
pub struct Boxed(Arc<BoxedValue>);

impl Boxed {
    /// Allocate a fresh, never-interned handle.
    ///
    /// Prefer the `box_*` functions, which consult the cache.
    #[inline]
    pub fn new(value: BoxedValue) -> Self {
        Boxed(Arc::new(value))
    }

    /// The boxed datum
    #[inline]
    pub fn value(&self) -> BoxedValue {
        *self.0
    }

    /// Whether both handles point at the same instance
    #[inline]
    pub fn ptr_eq(a: &Boxed, b: &Boxed) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl Deref for Boxed {
    type Target = BoxedValue;

    fn deref(&self) -> &BoxedValue {
        &self.0
    }
}

impl PartialEq for Boxed {
    fn eq(&self, other: &Self) -> bool {
        *self.0 == *other.0
    }
}

impl Eq for Boxed {}

impl Hash for Boxed {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

impl fmt::Debug for Boxed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for Boxed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.0, f)
    }
}

// ============================================================================
// Box cache
// ============================================================================

struct BoxCache {
    integers: Vec<Boxed>,
    characters: Vec<Boxed>,
}

impl BoxCache {
    fn build() -> Self {
        let integers = (INTEGER_CACHE_LOW..INTEGER_CACHE_HIGH)
            .map(|i| Boxed::new(BoxedValue::Integer(i)))
            .collect();
        let characters = (0..CHARACTER_CACHE_HIGH)
            .map(|c| Boxed::new(BoxedValue::Character(c)))
            .collect();
        BoxCache {
            integers,
            characters,
        }
    }
}

static BOX_CACHE: OnceCell<BoxCache> = OnceCell::new();

/// Build the process-wide box cache.
///
/// Idempotent and thread-safe. Runtimes call this once during start-up; the
/// `box_*` functions also force it on first use.
pub fn init_box_cache() {
    BOX_CACHE.get_or_init(BoxCache::build);
}

#[inline]
fn cache() -> &'static BoxCache {
    BOX_CACHE.get_or_init(BoxCache::build)
}

/// Box an integer, reusing the cached instance for `[-128, 256)`
#[inline]
pub fn box_integer(i: i32) -> Boxed {
    if (INTEGER_CACHE_LOW..INTEGER_CACHE_HIGH).contains(&i) {
        cache().integers[(i - INTEGER_CACHE_LOW) as usize].clone()
    } else {
        Boxed::new(BoxedValue::Integer(i))
    }
}

/// Box a character, reusing the cached instance for `[0, 256)`
#[inline]
pub fn box_char(c: u16) -> Boxed {
    if c < CHARACTER_CACHE_HIGH {
        cache().characters[c as usize].clone()
    } else {
        Boxed::new(BoxedValue::Character(c))
    }
}

/// Box a character from an arbitrary integer code.
///
/// Codes outside `[0, 65536)` are rejected with [`NativeError::RangeError`]
/// rather than wrapped.
pub fn box_char_code(code: i64) -> AbiResult<Boxed> {
    u16::try_from(code)
        .map(box_char)
        .map_err(|_| NativeError::RangeError {
            what: "character code".to_string(),
            value: code,
        })
}

/// Box a boolean as `Integer(1)` / `Integer(0)`
#[inline]
pub fn box_bool(b: bool) -> Boxed {
    box_integer(b as i32)
}

/// Box a 64-bit integer (never interned)
#[inline]
pub fn box_long(l: i64) -> Boxed {
    Boxed::new(BoxedValue::Long(l))
}

/// Box a 32-bit float (never interned)
#[inline]
pub fn box_f32(f: f32) -> Boxed {
    Boxed::new(BoxedValue::Float32(f))
}

/// Box a 64-bit float (never interned)
#[inline]
pub fn box_f64(f: f64) -> Boxed {
    Boxed::new(BoxedValue::Float64(f))
}

// ============================================================================
// NativeValue
// ============================================================================

/// Dynamically typed value passed to and returned from native calls.
#[derive(Clone, PartialEq, Default)]
pub enum NativeValue {
    /// Absence of a value (void returns)
    #[default]
    Null,
    /// Boxed numeric or character datum
    Boxed(Boxed),
    /// Immutable string
    String(Arc<str>),
}

impl NativeValue {
    /// Create a null value
    #[inline]
    pub fn null() -> Self {
        NativeValue::Null
    }

    /// Create a boxed integer value
    #[inline]
    pub fn integer(i: i32) -> Self {
        NativeValue::Boxed(box_integer(i))
    }

    /// Create a boxed character value
    #[inline]
    pub fn character(c: u16) -> Self {
        NativeValue::Boxed(box_char(c))
    }

    /// Create a boxed boolean (integer 0/1) value
    #[inline]
    pub fn bool(b: bool) -> Self {
        NativeValue::Boxed(box_bool(b))
    }

    /// Create a boxed 64-bit integer value
    #[inline]
    pub fn long(l: i64) -> Self {
        NativeValue::Boxed(box_long(l))
    }

    /// Create a boxed 32-bit float value
    #[inline]
    pub fn f32(f: f32) -> Self {
        NativeValue::Boxed(box_f32(f))
    }

    /// Create a boxed 64-bit float value
    #[inline]
    pub fn f64(f: f64) -> Self {
        NativeValue::Boxed(box_f64(f))
    }

    /// Create a string value
    #[inline]
    pub fn string(s: &str) -> Self {
        NativeValue::String(Arc::from(s))
    }

    /// Check if value is null
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, NativeValue::Null)
    }

    /// Get the boxed datum, if any
    #[inline]
    pub fn as_boxed(&self) -> Option<&Boxed> {
        match self {
            NativeValue::Boxed(b) => Some(b),
            _ => None,
        }
    }

    /// Get the string contents, if any
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            NativeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get type name for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            NativeValue::Null => "null",
            NativeValue::Boxed(b) => b.type_name(),
            NativeValue::String(_) => "string",
        }
    }
}

impl From<Boxed> for NativeValue {
    fn from(b: Boxed) -> Self {
        NativeValue::Boxed(b)
    }
}

impl fmt::Debug for NativeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeValue::Null => write!(f, "NativeValue::Null"),
            NativeValue::Boxed(b) => write!(f, "NativeValue::{:?}", b),
            NativeValue::String(s) => write!(f, "NativeValue::String({:?})", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_interning_bounds() {
        init_box_cache();
        assert!(Boxed::ptr_eq(&box_integer(-128), &box_integer(-128)));
        assert!(Boxed::ptr_eq(&box_integer(255), &box_integer(255)));
        assert!(!Boxed::ptr_eq(&box_integer(256), &box_integer(256)));
        assert!(!Boxed::ptr_eq(&box_integer(-129), &box_integer(-129)));
        assert_eq!(box_integer(256), box_integer(256));
        assert_eq!(box_integer(-129), box_integer(-129));
    }

    #[test]
    fn test_character_interning_bounds() {
        assert!(Boxed::ptr_eq(&box_char(0), &box_char(0)));
        assert!(Boxed::ptr_eq(&box_char(255), &box_char(255)));
        assert!(!Boxed::ptr_eq(&box_char(256), &box_char(256)));
        assert_eq!(box_char(0x4e2d), box_char(0x4e2d));
    }

    #[test]
    fn test_wide_types_never_interned() {
        assert!(!Boxed::ptr_eq(&box_long(1), &box_long(1)));
        assert!(!Boxed::ptr_eq(&box_f32(1.0), &box_f32(1.0)));
        assert!(!Boxed::ptr_eq(&box_f64(1.0), &box_f64(1.0)));
        assert_eq!(box_long(1), box_long(1));
    }

    #[test]
    fn test_equality_is_per_tag() {
        assert_ne!(box_integer(65), box_char(65));
        assert_ne!(box_integer(1), box_long(1));
        assert_ne!(box_f32(1.0), box_f64(1.0));
        assert_eq!(box_f64(f64::NAN), box_f64(f64::NAN));
        assert_ne!(box_f64(0.0), box_f64(-0.0));
    }

    #[test]
    fn test_fresh_handle_equals_cached() {
        let fresh = Boxed::new(BoxedValue::Integer(7));
        let cached = box_integer(7);
        assert!(!Boxed::ptr_eq(&fresh, &cached));
        assert_eq!(fresh, cached);
    }

    #[test]
    fn test_character_integer_views() {
        assert_eq!(box_char(0x41).as_integer(), Some(65));
        assert_eq!(box_integer(0x1_0041).as_character(), Some(0x41));
        assert_eq!(box_integer(-1).as_character(), Some(0xffff));
        assert_eq!(box_long(1).as_integer(), None);
    }

    #[test]
    fn test_char_code_range() {
        assert_eq!(box_char_code(65).unwrap(), box_char(65));
        assert_eq!(box_char_code(65535).unwrap(), box_char(65535));
        assert!(matches!(
            box_char_code(65536),
            Err(NativeError::RangeError { value: 65536, .. })
        ));
        assert!(box_char_code(-1).is_err());
    }

    #[test]
    fn test_bool_boxing() {
        assert_eq!(box_bool(true), box_integer(1));
        assert_eq!(box_bool(false), box_integer(0));
        assert!(Boxed::ptr_eq(&box_bool(true), &box_integer(1)));
    }

    #[test]
    fn test_display() {
        assert_eq!(box_char(0x61).to_string(), "a");
        assert_eq!(box_char(0xd800).to_string(), "\\u{d800}");
        assert_eq!(box_long(-5).to_string(), "-5");
        assert_eq!(NativeValue::string("hi").as_str(), Some("hi"));
    }
}
