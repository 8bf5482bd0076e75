//! Subprocess adapter for the external template compiler.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use tplc_core::{
    application::{ApplicationError, ports::TemplateCompiler},
    domain::CompileOptions,
    error::{Context as _, TplcResult},
};

/// Invokes an external template compiler executable, once per batch.
///
/// ## Process contract
///
/// The compiler is run as
///
/// ```text
/// <program> <args...> --root <source_root> --out <staging_dir>
///           [--namespace-declarations] [--doc-comments]
///           [--global KEY=VALUE]... <file>...
/// ```
///
/// and must write, for every input file, the compiled JavaScript to
/// `<staging_dir>/<path of the input relative to --root>.js`, creating
/// subdirectories as needed. The adapter reads the artifacts back in input
/// order; a non-zero exit or a missing artifact fails the whole batch with
/// the compiler's stderr attached.
///
/// The staging directory is a scratch `tempfile::TempDir` removed when the
/// adapter returns, so the compiler never touches the real output root.
pub struct CommandCompiler {
    program: PathBuf,
    args: Vec<String>,
    source_root: PathBuf,
}

impl CommandCompiler {
    /// Create an adapter for `program`, resolving artifact paths against
    /// `source_root` (the file set's base directory).
    pub fn new(program: impl Into<PathBuf>, source_root: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            source_root: source_root.into(),
        }
    }

    /// Extra arguments inserted before the generated flags.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    fn artifact_path(&self, staging: &Path, input: &Path) -> PathBuf {
        let relative = input.strip_prefix(&self.source_root).unwrap_or(input);
        let mut name = staging.join(relative).into_os_string();
        name.push(".js");
        PathBuf::from(name)
    }
}

impl TemplateCompiler for CommandCompiler {
    fn compile(&self, files: &[PathBuf], options: &CompileOptions) -> TplcResult<Vec<String>> {
        if files.is_empty() {
            return Ok(Vec::new());
        }

        let staging = tempfile::tempdir().context("creating compiler staging directory")?;

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg("--root")
            .arg(&self.source_root)
            .arg("--out")
            .arg(staging.path());
        if options.emits_namespace_declarations() {
            cmd.arg("--namespace-declarations");
        }
        if options.emits_doc_comments() {
            cmd.arg("--doc-comments");
        }
        for (key, value) in options.globals() {
            cmd.arg("--global").arg(format!("{key}={value}"));
        }
        cmd.args(files);

        debug!(
            program = %self.program.display(),
            templates = files.len(),
            "Invoking external template compiler"
        );

        let output = cmd.output().map_err(|e| ApplicationError::Compilation {
            reason: format!("failed to spawn '{}': {e}", self.program.display()),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ApplicationError::Compilation {
                reason: format!(
                    "compiler exited with {}: {}",
                    output.status,
                    stderr.trim()
                ),
            }
            .into());
        }

        let mut compiled = Vec::with_capacity(files.len());
        for file in files {
            let artifact = self.artifact_path(staging.path(), file);
            let text =
                std::fs::read_to_string(&artifact).map_err(|e| ApplicationError::Compilation {
                    reason: format!(
                        "compiler produced no artifact for '{}': {e}",
                        file.display()
                    ),
                })?;
            compiled.push(text);
        }
        Ok(compiled)
    }
}
