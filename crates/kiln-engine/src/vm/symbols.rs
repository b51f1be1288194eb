//! Symbol table loader
//!
//! A symbol manifest is plain text, one exported name per line. Line order is
//! dispatch-index order. The sequence ends at end-of-stream or at the first
//! empty line.
//!
//! Each pass numbers its lines starting from the number of distinct names the
//! library already has, so successive manifests extend one index space:
//!
//! ```text
//! pass 1: open close read   -> 0 1 2
//! pass 2: write             -> 3
//! ```
//!
//! A repeated name is rebound to the newer index while the counter still
//! advances, so the older index can no longer be reached by name. Because
//! passes start from the distinct-name count, a pass that follows such a
//! manifest hands out indices that are already bound. Both effects are part
//! of the observable loading behaviour and are logged, not corrected.

use std::io::BufRead;

use thiserror::Error;

use super::native_registry::LoadedLibrary;

/// Errors that can occur while loading a symbol manifest
#[derive(Debug, Error)]
pub enum LoadError {
    /// The manifest stream failed before end-of-stream
    #[error("I/O error reading symbol manifest for {soname} at line {line}: {source}")]
    Io {
        /// Library being loaded
        soname: String,
        /// 1-based line that could not be read
        line: usize,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },
}

/// Extend `library`'s binding table from a manifest stream.
///
/// Returns the number of names read in this pass. On an I/O failure the pass
/// stops and names bound before the failing line stay bound.
///
/// Passes against one library must not run concurrently with each other or
/// with calls that expect loading to be finished.
pub fn load<R: BufRead>(library: &LoadedLibrary, reader: R) -> Result<usize, LoadError> {
    let mut table = library.table().write();

    let first_index = table.len() as u32;
    if first_index < table.high_water() {
        log::warn!(
            "{}: symbol pass starts at index {} below high-water mark {}; indices may alias",
            library.soname(),
            first_index,
            table.high_water()
        );
    }

    let mut next_index = first_index;
    let mut consumed = 0usize;

    for (line_no, line) in reader.lines().enumerate() {
        let name = line.map_err(|source| LoadError::Io {
            soname: library.soname().to_string(),
            line: line_no + 1,
            source,
        })?;

        if name.is_empty() {
            break;
        }

        log::trace!("{}: bind {} -> {}", library.soname(), name, next_index);
        if let Some(previous) = table.bind(name.clone(), next_index) {
            log::warn!(
                "{}: symbol '{}' rebound from index {} to {}; index {} is unreachable by name",
                library.soname(),
                name,
                previous,
                next_index,
                previous
            );
        }

        next_index += 1;
        consumed += 1;
    }

    log::debug!(
        "{}: loaded {} symbol(s) at indices {}..{}",
        library.soname(),
        consumed,
        first_index,
        next_index
    );

    Ok(consumed)
}

/// Extend `library`'s binding table from an in-memory manifest
pub fn load_str(library: &LoadedLibrary, manifest: &str) -> Result<usize, LoadError> {
    load(library, manifest.as_bytes())
}
