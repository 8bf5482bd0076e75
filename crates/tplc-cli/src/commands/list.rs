//! Implementation of the `tplc list` command.
//!
//! Runs discovery only: resolves the file set exactly like `build` would and
//! prints the result, without touching the compiler or the output directory.

use tplc_adapters::GlobDiscoverer;
use tplc_core::{application::ports::FileDiscoverer, domain::FileSet};

use crate::{
    cli::{ListArgs, ListFormat, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(
    args: ListArgs,
    _global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let base_dir = args
        .base_dir
        .unwrap_or_else(|| config.sources.base_dir.clone());
    let include = if args.include.is_empty() {
        config.sources.include.clone()
    } else {
        args.include
    };
    let exclude = if args.exclude.is_empty() {
        config.sources.exclude.clone()
    } else {
        args.exclude
    };

    let sources = FileSet::new(base_dir)
        .with_includes(include)
        .with_excludes(exclude);
    sources.validate().map_err(|e| CliError::Core(e.into()))?;

    let resolved = GlobDiscoverer::new()
        .resolve(&sources)
        .map_err(CliError::Core)?;

    match args.format {
        ListFormat::Table => {
            output.header(&format!(
                "Resolved templates ({}) under {}:",
                resolved.len(),
                sources.base_dir().display()
            ))?;
            for file in &resolved {
                output.print(&format!("  {file}"))?;
            }
        }

        ListFormat::List => {
            for file in &resolved {
                println!("{file}");
            }
        }

        ListFormat::Json => {
            // Serialise as a JSON array to stdout (bypasses OutputManager
            // because JSON output must be parseable even in non-TTY pipes).
            let names: Vec<&str> = resolved.iter().map(|p| p.as_str()).collect();
            let json = serde_json::to_string_pretty(&names).unwrap_or_else(|_| "[]".into());
            println!("{json}");
        }
    }

    Ok(())
}
