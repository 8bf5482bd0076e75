//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the pipeline needs from external systems.
//! The `tplc-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{CompileOptions, FileSet, RelativePath};
use crate::error::TplcResult;

/// Port for file-set resolution.
///
/// Implemented by:
/// - `tplc_adapters::discovery::GlobDiscoverer` (production)
///
/// ## Contract
///
/// - Returned paths are relative to `sources.base_dir()`.
/// - The list is sorted lexicographically; two calls against an unchanged
///   filesystem return the identical ordered list. The writer pairs compiled
///   outputs with these entries positionally, so order is load-bearing.
/// - An empty include list resolves to an empty list.
#[cfg_attr(test, mockall::automock)]
pub trait FileDiscoverer: Send + Sync {
    /// Expand a file set into an ordered list of relative paths.
    fn resolve(&self, sources: &FileSet) -> TplcResult<Vec<RelativePath>>;
}

/// Port for the external template compilation capability.
///
/// Implemented by:
/// - `tplc_adapters::compiler::CommandCompiler` (production)
/// - `tplc_adapters::compiler::FakeCompiler` (testing)
///
/// ## Contract
///
/// - `files` are absolute paths, one per template, in resolved order.
/// - One invocation covers the whole batch; a single bad template fails the
///   entire call.
/// - On success the result holds exactly one output string per input, in
///   input order. The service treats any length mismatch as fatal.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateCompiler: Send + Sync {
    /// Compile the batch to JavaScript source, one string per input.
    fn compile(&self, files: &[PathBuf], options: &CompileOptions) -> TplcResult<Vec<String>>;
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `tplc_adapters::filesystem::LocalFilesystem` (production)
/// - `tplc_adapters::filesystem::MemoryFilesystem` (testing)
///
/// `write_file` creates or truncates; implementations release the underlying
/// handle on every exit path.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> TplcResult<()>;

    /// Write content to a file, creating or truncating it.
    fn write_file(&self, path: &Path, content: &str) -> TplcResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}
