//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "tplc",
    bin_name = "tplc",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Batch-compile templates to JavaScript",
    long_about = "tplc resolves a set of template sources, hands the whole \
                  batch to an external template compiler, and mirrors the \
                  generated JavaScript under an output directory.",
    after_help = "EXAMPLES:\n\
        \x20 tplc build --base-dir templates --include '**/*.tpl' --out generated/js\n\
        \x20 tplc build --global DEBUG=false --namespace-declarations\n\
        \x20 tplc list --base-dir templates --include '**/*.tpl'\n\
        \x20 tplc completions bash > /usr/share/bash-completion/completions/tplc",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compile the template batch.
    #[command(
        visible_alias = "b",
        about = "Compile templates to JavaScript",
        after_help = "EXAMPLES:\n\
            \x20 tplc build\n\
            \x20 tplc build --base-dir templates --include '**/*.tpl'\n\
            \x20 tplc build --fail-fast --global LOCALE=en"
    )]
    Build(BuildArgs),

    /// List the files the batch would compile.
    #[command(
        visible_alias = "ls",
        about = "List resolved template files",
        after_help = "EXAMPLES:\n\
            \x20 tplc list\n\
            \x20 tplc list --format json\n\
            \x20 tplc list --base-dir templates --include '**/*.tpl'"
    )]
    List(ListArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 tplc completions bash > ~/.local/share/bash-completion/completions/tplc\n\
            \x20 tplc completions zsh  > ~/.zfunc/_tplc\n\
            \x20 tplc completions fish > ~/.config/fish/completions/tplc.fish"
    )]
    Completions(CompletionsArgs),
}

// ── build ─────────────────────────────────────────────────────────────────────

/// Arguments for `tplc build`.
///
/// Every flag overrides the corresponding `tplc.toml` entry; unset flags
/// fall back to the configuration file, then to built-in defaults.
#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Base directory the include/exclude patterns are resolved against.
    #[arg(short = 'b', long = "base-dir", value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Include glob (repeatable). An empty include list matches nothing.
    #[arg(short = 'i', long = "include", value_name = "GLOB")]
    pub include: Vec<String>,

    /// Exclude glob (repeatable).
    #[arg(short = 'x', long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Output directory for generated JavaScript.
    #[arg(short = 'o', long = "out", value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Suffix appended to every generated filename.
    #[arg(long = "suffix", value_name = "SUFFIX")]
    pub suffix: Option<String>,

    /// External template compiler executable.
    #[arg(long = "compiler", value_name = "PROGRAM")]
    pub compiler: Option<PathBuf>,

    /// Extra argument passed to the compiler (repeatable).
    #[arg(long = "compiler-arg", value_name = "ARG")]
    pub compiler_args: Vec<String>,

    /// Compile-time global binding (repeatable).
    #[arg(short = 'g', long = "global", value_name = "KEY=VALUE")]
    pub globals: Vec<String>,

    /// Emit namespace provide/require declarations.
    #[arg(long = "namespace-declarations")]
    pub namespace_declarations: bool,

    /// Emit doc comments in generated code.
    #[arg(long = "doc-comments")]
    pub doc_comments: bool,

    /// Abort on the first output file that cannot be written, instead of
    /// logging it and continuing with the rest of the batch.
    #[arg(long = "fail-fast")]
    pub fail_fast: bool,

    /// Show what would be compiled without invoking the compiler.
    #[arg(long = "dry-run", help = "Resolve and print the plan without compiling")]
    pub dry_run: bool,
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `tplc list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Base directory the include/exclude patterns are resolved against.
    #[arg(short = 'b', long = "base-dir", value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Include glob (repeatable).
    #[arg(short = 'i', long = "include", value_name = "GLOB")]
    pub include: Vec<String>,

    /// Exclude glob (repeatable).
    #[arg(short = 'x', long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One path per line.
    List,
    /// JSON array.
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `tplc completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────
