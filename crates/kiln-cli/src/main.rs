//! Kiln command-line tool
//!
//! Inspects symbol manifests and calls core primitives from the shell.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod commands;
mod literal;
mod output;

/// Environment variable holding the log filter
pub(crate) const LOG_ENV: &str = "KILN_LOG";

#[derive(Parser)]
#[command(name = "kiln")]
#[command(about = "Kiln native library toolkit", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load symbol manifests and print the binding table
    Symbols {
        /// Library name used in diagnostics
        #[arg(long, default_value = "scratch")]
        soname: String,
        /// Manifest files, loaded in order
        #[arg(required = true)]
        manifests: Vec<PathBuf>,
    },

    /// Call a core primitive
    Call {
        /// Function name in kiln.core
        function: String,
        /// Value to bind ahead of the arguments (repeatable, applied in order)
        #[arg(long, allow_negative_numbers = true)]
        bind: Vec<String>,
        /// Call arguments as literals
        #[arg(allow_negative_numbers = true)]
        args: Vec<String>,
    },

    /// Display version and environment info
    Info,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV, "warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Symbols { soname, manifests } => commands::symbols::execute(&soname, &manifests),
        Commands::Call {
            function,
            bind,
            args,
        } => commands::call::execute(&function, &bind, &args),
        Commands::Info => commands::info::execute(),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}
