//! `kiln symbols`: Load manifest files and print the resulting binding table.

use std::fmt::Write as _;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use kiln_engine::vm::symbols::load;
use kiln_engine::{LoadedLibrary, NativeLibrary};
use kiln_sdk::{AbiResult, NativeContext, NativeError, NativeValue};

/// Library with no implementations, used only to inspect index assignment
struct ScratchLibrary {
    soname: String,
}

impl NativeLibrary for ScratchLibrary {
    fn soname(&self) -> &str {
        &self.soname
    }

    fn invoke(
        &self,
        index: u32,
        _ctx: &dyn NativeContext,
        _args: &[NativeValue],
    ) -> AbiResult<NativeValue> {
        Err(NativeError::UnknownIndex {
            soname: self.soname.clone(),
            index,
        })
    }
}

/// Load every manifest in order into one scratch library
pub fn load_manifests(soname: &str, manifests: &[PathBuf]) -> anyhow::Result<Arc<LoadedLibrary>> {
    let library = LoadedLibrary::new(ScratchLibrary {
        soname: soname.to_string(),
    });

    for path in manifests {
        let file =
            File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
        let count = load(&library, BufReader::new(file))
            .with_context(|| format!("failed to load {}", path.display()))?;
        log::info!("{}: {} name(s)", path.display(), count);
    }

    Ok(library)
}

/// Binding table in index order, followed by any unreachable slots
pub fn render(library: &LoadedLibrary) -> String {
    let mut bindings = library.bindings();
    bindings.sort_by_key(|(_, index)| *index);

    let mut out = String::new();
    let _ = writeln!(out, "{}: {} symbol(s)", library.soname(), bindings.len());
    for (name, index) in &bindings {
        let _ = writeln!(out, "{:>6}  {}", index, name);
    }

    let unreachable = library.unreachable_indices();
    if !unreachable.is_empty() {
        let list: Vec<String> = unreachable.iter().map(u32::to_string).collect();
        let _ = writeln!(out, "unreachable: {}", list.join(", "));
    }
    out
}

pub fn execute(soname: &str, manifests: &[PathBuf]) -> anyhow::Result<ExitCode> {
    let library = load_manifests(soname, manifests)?;
    print!("{}", render(&library));
    Ok(ExitCode::SUCCESS)
}
