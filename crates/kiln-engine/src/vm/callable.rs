//! Callables and the uniform invoke contract
//!
//! Interpreted code calls everything through [`Callable::invoke`]. The set of
//! variants is closed:
//!
//! - [`NativeFunction`]: a library plus the dispatch index its name resolved to
//! - [`PartialApplication`]: another callable with one leading argument bound
//! - [`InterpretedFunction`]: implemented by the interpreter
//!
//! Wrapping layers never check arity or argument kinds; only the innermost
//! implementation does. Failures are normalized to [`StructuredError`] at the
//! native boundary and every wrapper they cross appends exactly one frame.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use kiln_sdk::{CallResult, NativeContext, NativeError, NativeValue, StructuredError};

use super::defaults::{CURRY_MARKER, NATIVE_FRAME_LABEL, PARTIAL_FRAME_LABEL, SIGNATURE_SEPARATOR};
use super::native_registry::LoadedLibrary;

/// A function body executed by the interpreter.
///
/// The dispatch core only forwards to it; errors it returns pass through
/// native and partial-application layers like any other failure.
pub trait InterpretedFunction: Send + Sync {
    /// Human-readable signature used in traces
    fn signature(&self) -> String;

    /// Execute the function
    fn invoke(&self, ctx: &dyn NativeContext, args: &[NativeValue]) -> CallResult<NativeValue>;
}

/// Anything interpreted code can call.
#[derive(Clone)]
pub enum Callable {
    /// Host primitive bound to a dispatch index
    Native(NativeFunction),
    /// Callable with a leading argument bound
    Partial(PartialApplication),
    /// Function implemented by the interpreter
    Interpreted(Arc<dyn InterpretedFunction>),
}

impl Callable {
    /// Invoke with the given context and arguments
    pub fn invoke(&self, ctx: &dyn NativeContext, args: &[NativeValue]) -> CallResult<NativeValue> {
        match self {
            Callable::Native(f) => f.invoke(ctx, args),
            Callable::Partial(p) => p.invoke(ctx, args),
            Callable::Interpreted(f) => f.invoke(ctx, args),
        }
    }

    /// Signature string, including one curry marker per wrapping level
    pub fn signature(&self) -> String {
        match self {
            Callable::Native(f) => f.signature(),
            Callable::Partial(p) => p.signature(),
            Callable::Interpreted(f) => f.signature(),
        }
    }

    /// Bind `bound` as the new leading argument
    pub fn curry(self, bound: NativeValue) -> Callable {
        Callable::Partial(PartialApplication::new(self, bound))
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callable({})", self.signature())
    }
}

// ============================================================================
// Native functions
// ============================================================================

/// A library export resolved to its dispatch index.
#[derive(Clone)]
pub struct NativeFunction {
    library: Arc<LoadedLibrary>,
    name: Arc<str>,
    index: u32,
}

impl NativeFunction {
    pub(crate) fn new(library: Arc<LoadedLibrary>, name: &str, index: u32) -> Self {
        Self {
            library,
            name: Arc::from(name),
            index,
        }
    }

    /// Owning library
    pub fn library(&self) -> &Arc<LoadedLibrary> {
        &self.library
    }

    /// Export name this function was resolved from
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dispatch index captured at resolution time
    pub fn index(&self) -> u32 {
        self.index
    }

    /// `soname::name`
    pub fn signature(&self) -> String {
        format!("{}{}{}", self.library.soname(), SIGNATURE_SEPARATOR, self.name)
    }

    /// Forward `(index, ctx, args)` to the owning library.
    ///
    /// Library errors and panics become a [`StructuredError`] with one frame
    /// naming this function.
    pub fn invoke(&self, ctx: &dyn NativeContext, args: &[NativeValue]) -> CallResult<NativeValue> {
        let outcome = catch_host_panic(|| {
            self.library
                .invoke(self.index, ctx, args)
                .map_err(StructuredError::new)
        });
        outcome.map_err(|err| err.with_frame(self.signature(), NATIVE_FRAME_LABEL))
    }
}

// ============================================================================
// Partial application
// ============================================================================

/// A callable with one leading argument permanently bound.
///
/// Nesting binds left to right: currying `f` with `x` and then the result
/// with `y` calls `f(x, y, ...)`.
#[derive(Clone)]
pub struct PartialApplication {
    inner: Arc<Callable>,
    bound: NativeValue,
}

impl PartialApplication {
    /// Bind `bound` in front of every call to `inner`
    pub fn new(inner: Callable, bound: NativeValue) -> Self {
        Self {
            inner: Arc::new(inner),
            bound,
        }
    }

    /// The wrapped callable
    pub fn inner(&self) -> &Callable {
        &self.inner
    }

    /// The bound leading argument
    pub fn bound(&self) -> &NativeValue {
        &self.bound
    }

    /// Inner signature plus one curry marker
    pub fn signature(&self) -> String {
        format!("{}{}", self.inner.signature(), CURRY_MARKER)
    }

    /// Prepend the bound argument and delegate.
    ///
    /// Any failure from the inner call gets one frame naming this wrapper.
    pub fn invoke(&self, ctx: &dyn NativeContext, args: &[NativeValue]) -> CallResult<NativeValue> {
        let mut full = Vec::with_capacity(args.len() + 1);
        full.push(self.bound.clone());
        full.extend_from_slice(args);

        catch_host_panic(|| self.inner.invoke(ctx, &full))
            .map_err(|err| err.with_frame(self.signature(), PARTIAL_FRAME_LABEL))
    }
}

// ============================================================================
// Panic normalization
// ============================================================================

fn catch_host_panic<F>(call: F) -> CallResult<NativeValue>
where
    F: FnOnce() -> CallResult<NativeValue>,
{
    panic::catch_unwind(AssertUnwindSafe(call)).unwrap_or_else(|payload| {
        let msg = panic_message(payload.as_ref());
        log::debug!("host panic during native call: {}", msg);
        Err(StructuredError::new(NativeError::Panic(msg)))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
