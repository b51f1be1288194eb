//! NativeContext trait: the caller's execution context
//!
//! The interpreter hands a context to every call. The dispatch core never
//! inspects it; it is threaded through wrapping layers unchanged so that
//! primitives can reach back into their caller.

/// Execution context of the calling task.
///
/// Implemented by the interpreter. Primitives may query it; the dispatch
/// core only passes it along.
pub trait NativeContext: Send + Sync {
    /// Identifier of the calling task
    fn task_id(&self) -> u64;

    /// Whether the caller has asked the current call to stop.
    ///
    /// Long-running primitives poll this; nothing in the core does.
    fn is_interrupted(&self) -> bool {
        false
    }
}

/// A context for calls made outside any interpreter task (tests, tooling).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullContext;

impl NativeContext for NullContext {
    fn task_id(&self) -> u64 {
        0
    }
}
