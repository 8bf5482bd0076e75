//! Implementation of the `tplc build` command.
//!
//! Responsibility: merge CLI arguments over the loaded configuration into a
//! `CompileJob`, wire the production adapters into the core service, and
//! display results. No pipeline logic lives here.

use std::path::PathBuf;

use tracing::{debug, info, instrument};

use tplc_adapters::{CommandCompiler, GlobDiscoverer, LocalFilesystem};
use tplc_core::{
    application::{CompileService, ports::FileDiscoverer},
    domain::{CompileJob, CompileOptions, FileSet, WritePolicy},
};

use crate::{
    cli::{BuildArgs, global::GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `tplc build` command.
///
/// Dispatch sequence:
/// 1. Merge flags over config into a `CompileJob`
/// 2. Early-exit with the resolved plan if `--dry-run`
/// 3. Resolve the compiler executable
/// 4. Wire adapters and run the pipeline
/// 5. Report the summary, including any skipped files
#[instrument(skip_all)]
pub fn execute(
    args: BuildArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Build the job (flags > config > defaults)
    let job = assemble_job(&args, &config)?;

    debug!(
        base = %job.sources.base_dir().display(),
        out = %job.output_dir.display(),
        includes = job.sources.include_patterns().len(),
        excludes = job.sources.exclude_patterns().len(),
        "Job assembled"
    );

    // 2. Dry run: resolve and describe, but do not compile or write.
    if args.dry_run {
        return dry_run(&job, &output);
    }

    // 3. Resolve the compiler executable
    let program = args
        .compiler
        .clone()
        .or_else(|| config.compiler.program.clone())
        .ok_or(CliError::MissingCompiler)?;
    let mut compiler_args = config.compiler.args.clone();
    compiler_args.extend(args.compiler_args.iter().cloned());

    // 4. Create adapters and run
    let discoverer = Box::new(GlobDiscoverer::new());
    let compiler =
        Box::new(CommandCompiler::new(&program, job.sources.base_dir()).args(compiler_args));
    let filesystem = Box::new(LocalFilesystem::new());
    let service = CompileService::new(discoverer, compiler, filesystem);

    output.header("Compiling templates...")?;
    info!(program = %program.display(), "Build started");

    let summary = service.run(&job).map_err(CliError::Core)?;

    // 5. Report
    if summary.total() == 0 {
        output.info("No templates matched the file set; nothing to do")?;
        return Ok(());
    }

    for (file, reason) in &summary.failed {
        output.warning(&format!("Skipped {file}: {reason}"))?;
    }

    if summary.is_clean() {
        output.success(&format!(
            "Compiled {} template(s) into {}",
            summary.written.len(),
            job.output_dir.display()
        ))?;
    } else {
        output.warning(&format!(
            "Compiled {} template(s), {} failed to write",
            summary.written.len(),
            summary.failed.len()
        ))?;
    }

    if !global.quiet && !summary.is_clean() {
        output.print("")?;
        output.print("Re-run with --fail-fast to abort on the first write failure.")?;
    }

    Ok(())
}

// ── Job assembly ──────────────────────────────────────────────────────────────

/// Merge CLI flags over the loaded config into a validated `CompileJob`.
fn assemble_job(args: &BuildArgs, config: &AppConfig) -> CliResult<CompileJob> {
    let base_dir: PathBuf = args
        .base_dir
        .clone()
        .unwrap_or_else(|| config.sources.base_dir.clone());

    // A non-empty flag list replaces the configured one wholesale; mixing
    // the two would make runs hard to reason about.
    let include = if args.include.is_empty() {
        config.sources.include.clone()
    } else {
        args.include.clone()
    };
    let exclude = if args.exclude.is_empty() {
        config.sources.exclude.clone()
    } else {
        args.exclude.clone()
    };

    let sources = FileSet::new(base_dir)
        .with_includes(include)
        .with_excludes(exclude);

    let mut options = CompileOptions::new()
        .namespace_declarations(args.namespace_declarations || config.options.namespace_declarations)
        .doc_comments(args.doc_comments || config.options.doc_comments)
        .with_globals(config.options.globals.clone());
    for binding in &args.globals {
        let (key, value) = CompileOptions::parse_global(binding)
            .map_err(|e| CliError::Core(e.into()))?;
        options = options.global(key, value);
    }

    let out = args
        .out
        .clone()
        .unwrap_or_else(|| config.output.directory.clone());
    let suffix = args
        .suffix
        .clone()
        .unwrap_or_else(|| config.output.suffix.clone());
    let policy = if args.fail_fast {
        WritePolicy::FailFast
    } else {
        WritePolicy::Continue
    };

    let job = CompileJob::new(sources, out)
        .suffix(suffix)
        .options(options)
        .write_policy(policy);
    job.validate().map_err(|e| CliError::Core(e.into()))?;
    Ok(job)
}

// ── Dry run ───────────────────────────────────────────────────────────────────

/// Resolve the file set and print the plan without compiling.
fn dry_run(job: &CompileJob, output: &OutputManager) -> CliResult<()> {
    let resolved = GlobDiscoverer::new()
        .resolve(&job.sources)
        .map_err(CliError::Core)?;

    output.header(&format!(
        "Dry run: {} template(s) would be compiled",
        resolved.len()
    ))?;
    for file in &resolved {
        let target = job.output_dir.join(file.with_appended(&job.suffix).as_path());
        output.print(&format!("  {} -> {}", file, target.display()))?;
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
