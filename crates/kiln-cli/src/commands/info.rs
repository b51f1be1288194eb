//! `kiln info`: Display build and environment info.

use std::process::ExitCode;

use crate::LOG_ENV;

pub fn execute() -> anyhow::Result<ExitCode> {
    println!("Kiln v{}", env!("CARGO_PKG_VERSION"));
    println!();

    println!("Platform:     {} ({})", std::env::consts::OS, std::env::consts::ARCH);

    let core = kiln_stdlib::open()?;
    println!("Core library: {} ({} symbols)", core.soname(), core.len());

    println!();
    println!("Environment:");
    print_env("  KILN_LOG", LOG_ENV);
    print_env("  NO_COLOR", "NO_COLOR");

    Ok(ExitCode::SUCCESS)
}

fn print_env(label: &str, var: &str) {
    match std::env::var(var) {
        Ok(val) => println!("{} = {}", label, val),
        Err(_) => println!("{} = (default)", label),
    }
}
