//! Native dispatch registry
//!
//! [`NativeLibrary`] is what a host library implements: an identifier and a
//! single index-based `invoke`. [`LoadedLibrary`] wraps one with the
//! name → dispatch-index table built by the symbol loader. Names are resolved
//! once, into index-bound [`Callable`]s; calls never look a name up.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use kiln_sdk::{AbiResult, NativeContext, NativeValue};

use super::callable::{Callable, NativeFunction};

/// A host-implemented group of primitives.
///
/// `invoke` is the single extension point. The index is the one the symbol
/// loader assigned from the library's manifest; the library decides how to map
/// it to a primitive and is responsible for validating `args`.
pub trait NativeLibrary: Send + Sync {
    /// Stable identifier used by the outer loader/linker
    fn soname(&self) -> &str;

    /// Run the primitive behind `index`
    fn invoke(
        &self,
        index: u32,
        ctx: &dyn NativeContext,
        args: &[NativeValue],
    ) -> AbiResult<NativeValue>;
}

/// Name → dispatch-index bindings of one library.
///
/// Insertion-ordered. Rebinding a name keeps its original position and
/// replaces its index. `high_water` is one past the largest index ever
/// assigned and only feeds diagnostics.
#[derive(Debug, Default)]
pub(crate) struct BindingTable {
    names: IndexMap<String, u32>,
    high_water: u32,
}

impl BindingTable {
    /// Number of distinct names
    pub(crate) fn len(&self) -> usize {
        self.names.len()
    }

    pub(crate) fn high_water(&self) -> u32 {
        self.high_water
    }

    /// Bind `name` to `index`, returning the index it previously had
    pub(crate) fn bind(&mut self, name: String, index: u32) -> Option<u32> {
        self.high_water = self.high_water.max(index.saturating_add(1));
        self.names.insert(name, index)
    }
}

/// A loaded native library: the implementation plus its binding table.
///
/// Shared behind an `Arc` by every callable it hands out. The table is only
/// written by loader passes; after loading completes all access is reads.
pub struct LoadedLibrary {
    library: Box<dyn NativeLibrary>,
    table: RwLock<BindingTable>,
}

impl std::fmt::Debug for LoadedLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedLibrary")
            .field("soname", &self.soname())
            .field("count", &self.len())
            .finish()
    }
}

impl LoadedLibrary {
    /// Wrap a library with an empty binding table
    pub fn new(library: impl NativeLibrary + 'static) -> Arc<Self> {
        Self::from_boxed(Box::new(library))
    }

    /// Wrap an already boxed library with an empty binding table
    pub fn from_boxed(library: Box<dyn NativeLibrary>) -> Arc<Self> {
        Arc::new(Self {
            library,
            table: RwLock::new(BindingTable::default()),
        })
    }

    /// Library identifier
    pub fn soname(&self) -> &str {
        self.library.soname()
    }

    /// Resolve an exported name to a callable bound to its dispatch index.
    ///
    /// Returns `None` when the name was never loaded.
    pub fn get_function(self: &Arc<Self>, name: &str) -> Option<Callable> {
        let index = self.index_of(name)?;
        Some(Callable::Native(NativeFunction::new(
            Arc::clone(self),
            name,
            index,
        )))
    }

    /// Dispatch index currently bound to `name`
    pub fn index_of(&self, name: &str) -> Option<u32> {
        self.table.read().names.get(name).copied()
    }

    /// Snapshot of all bindings in first-insertion order
    pub fn bindings(&self) -> Vec<(String, u32)> {
        self.table
            .read()
            .names
            .iter()
            .map(|(name, index)| (name.clone(), *index))
            .collect()
    }

    /// Indices below the high-water mark that no name resolves to
    pub fn unreachable_indices(&self) -> Vec<u32> {
        let table = self.table.read();
        let mut bound = vec![false; table.high_water as usize];
        for index in table.names.values() {
            bound[*index as usize] = true;
        }
        bound
            .iter()
            .enumerate()
            .filter(|(_, reachable)| !**reachable)
            .map(|(index, _)| index as u32)
            .collect()
    }

    /// Number of distinct bound names
    pub fn len(&self) -> usize {
        self.table.read().len()
    }

    /// Check if no names are bound
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forward a call to the library by dispatch index
    pub fn invoke(
        &self,
        index: u32,
        ctx: &dyn NativeContext,
        args: &[NativeValue],
    ) -> AbiResult<NativeValue> {
        log::trace!(
            "dispatch {}#{} with {} argument(s)",
            self.soname(),
            index,
            args.len()
        );
        self.library.invoke(index, ctx, args)
    }

    pub(crate) fn table(&self) -> &RwLock<BindingTable> {
        &self.table
    }
}
