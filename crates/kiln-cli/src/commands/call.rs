//! `kiln call`: Invoke a core primitive with optional bound arguments.

use std::process::ExitCode;

use anyhow::anyhow;
use kiln_sdk::{CallResult, NativeValue, NullContext};

use crate::{literal, output};

/// Resolve `function` in the core library, curry `bind` in order, and call it
pub fn call(function: &str, bind: &[String], args: &[String]) -> anyhow::Result<CallResult<NativeValue>> {
    let library = kiln_stdlib::open()?;
    let mut callable = library
        .get_function(function)
        .ok_or_else(|| anyhow!("no function named '{}' in {}", function, library.soname()))?;

    for text in bind {
        callable = callable.curry(literal::parse(text)?);
    }
    let args = args
        .iter()
        .map(|text| literal::parse(text))
        .collect::<anyhow::Result<Vec<_>>>()?;

    log::debug!("calling {} with {} argument(s)", callable.signature(), args.len());
    Ok(callable.invoke(&NullContext, &args))
}

pub fn execute(function: &str, bind: &[String], args: &[String]) -> anyhow::Result<ExitCode> {
    match call(function, bind, args)? {
        Ok(value) => {
            println!("{}", literal::format(&value));
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            output::error(&err.render());
            Ok(ExitCode::FAILURE)
        }
    }
}
