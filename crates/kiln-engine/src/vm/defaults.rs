//! Default constants for the dispatch core.
//!
//! Centralizes the labels and markers that show up in signatures and traces.

/// Appended to a callable's signature once per level of partial application.
pub const CURRY_MARKER: &str = "/curried";

/// Trace label attached where a native primitive's failure enters the trace.
pub const NATIVE_FRAME_LABEL: &str = "native call";

/// Trace label attached by every partial-application wrapper a failure crosses.
pub const PARTIAL_FRAME_LABEL: &str = "partial application";

/// Separator between a library's soname and a function name in signatures.
pub const SIGNATURE_SEPARATOR: &str = "::";
