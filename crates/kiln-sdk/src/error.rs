//! Error types for native calls
//!
//! Two layers:
//! - [`NativeError`]: a raw failure raised by a primitive or a value conversion.
//! - [`StructuredError`]: a root cause plus the append-only list of
//!   [`TraceFrame`]s collected while the failure propagated outward.

use std::fmt;

/// Result type for primitive implementations and value conversions
pub type AbiResult<T> = Result<T, NativeError>;

/// Result type for callable invocation
pub type CallResult<T> = Result<T, StructuredError>;

/// Native call error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NativeError {
    /// Type mismatch during conversion
    #[error("Type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        /// Expected type name
        expected: String,
        /// Actual type name
        got: String,
    },

    /// Value outside the representable range of the target type
    #[error("Range error: {what} {value} out of range")]
    RangeError {
        /// What was being converted
        what: String,
        /// Offending value
        value: i64,
    },

    /// Invalid argument
    #[error("Argument error: {0}")]
    ArgumentError(String),

    /// No primitive behind a dispatch index
    #[error("Invalid native function index {index} in {soname}")]
    UnknownIndex {
        /// Library identifier
        soname: String,
        /// Requested index
        index: u32,
    },

    /// Function panicked
    #[error("Function panicked: {0}")]
    Panic(String),

    /// Library-level error
    #[error("Library error: {0}")]
    LibraryError(String),
}

impl NativeError {
    /// Build a type mismatch from an expected name and the offending type name
    pub fn type_mismatch(expected: &str, got: &str) -> Self {
        NativeError::TypeMismatch {
            expected: expected.to_string(),
            got: got.to_string(),
        }
    }

    /// Build an arity error for a primitive
    pub fn arity(name: &str, expected: usize, got: usize) -> Self {
        NativeError::ArgumentError(format!(
            "{} expects {} argument(s), got {}",
            name, expected, got
        ))
    }
}

impl From<String> for NativeError {
    fn from(s: String) -> Self {
        NativeError::LibraryError(s)
    }
}

impl From<&str> for NativeError {
    fn from(s: &str) -> Self {
        NativeError::LibraryError(s.to_string())
    }
}

// ============================================================================
// Structured errors
// ============================================================================

/// One entry in a structured error's call-site history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceFrame {
    /// Description of the callable that attached this frame
    pub callable: String,
    /// Fixed label describing the boundary kind
    pub label: String,
}

impl fmt::Display for TraceFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at {} ({})", self.callable, self.label)
    }
}

/// A failure plus the trace frames accumulated while it propagated.
///
/// Frames are stored innermost first; each wrapping boundary appends one.
/// Existing frames are never reordered or removed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{cause}")]
pub struct StructuredError {
    #[source]
    cause: NativeError,
    frames: Vec<TraceFrame>,
}

impl StructuredError {
    /// Wrap a raw failure with an empty trace
    pub fn new(cause: NativeError) -> Self {
        StructuredError {
            cause,
            frames: Vec::new(),
        }
    }

    /// Append a frame and hand the error back
    #[must_use]
    pub fn with_frame(mut self, callable: impl Into<String>, label: impl Into<String>) -> Self {
        self.frames.push(TraceFrame {
            callable: callable.into(),
            label: label.into(),
        });
        self
    }

    /// The originating failure
    pub fn cause(&self) -> &NativeError {
        &self.cause
    }

    /// All frames, innermost first
    pub fn frames(&self) -> &[TraceFrame] {
        &self.frames
    }

    /// The most recently appended frame
    pub fn outermost(&self) -> Option<&TraceFrame> {
        self.frames.last()
    }

    /// Render the cause followed by one `at ...` line per frame, innermost first
    pub fn render(&self) -> String {
        let mut out = self.cause.to_string();
        for frame in &self.frames {
            out.push_str("\n    ");
            out.push_str(&frame.to_string());
        }
        out
    }
}

impl From<NativeError> for StructuredError {
    fn from(cause: NativeError) -> Self {
        StructuredError::new(cause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_append_in_order() {
        let err = StructuredError::new(NativeError::ArgumentError("bad".into()))
            .with_frame("core::div", "native call")
            .with_frame("core::div/curried", "partial application");

        assert_eq!(err.frames().len(), 2);
        assert_eq!(err.frames()[0].callable, "core::div");
        assert_eq!(err.outermost().unwrap().label, "partial application");
        assert_eq!(err.cause(), &NativeError::ArgumentError("bad".into()));
    }

    #[test]
    fn test_render() {
        let err = StructuredError::from(NativeError::Panic("boom".into()))
            .with_frame("lib::f", "native call");
        assert_eq!(
            err.render(),
            "Function panicked: boom\n    at lib::f (native call)"
        );
        assert_eq!(err.to_string(), "Function panicked: boom");
    }

    #[test]
    fn test_arity_message() {
        let err = NativeError::arity("add", 2, 1);
        assert_eq!(
            err.to_string(),
            "Argument error: add expects 2 argument(s), got 1"
        );
    }
}
