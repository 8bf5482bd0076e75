//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during pipeline orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The base directory could not be enumerated.
    /// Fatal: aborts before any compilation is attempted.
    #[error("Discovery failed for {}: {reason}", path.display())]
    Discovery { path: PathBuf, reason: String },

    /// The external compiler rejected or failed on the batch.
    /// Fatal for the whole run; the compiler is invoked once for all files,
    /// so there is no per-file isolation at this stage.
    #[error("Template compilation failed: {reason}")]
    Compilation { reason: String },

    /// The compiler broke its positional contract: it must return exactly
    /// one output per input, in input order.
    #[error("Compiler returned {actual} outputs for {expected} inputs")]
    OutputCountMismatch { expected: usize, actual: usize },

    /// Directory creation or file write failed.
    #[error("Filesystem error at {}: {reason}", path.display())]
    Filesystem { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Discovery { path, reason } => vec![
                format!("Could not read templates under: {}", path.display()),
                format!("Details: {}", reason),
                "Check that the base directory exists and is readable".into(),
            ],
            Self::Compilation { .. } => vec![
                "The external template compiler reported an error".into(),
                "Fix the offending template; the whole batch is compiled in one call".into(),
            ],
            Self::OutputCountMismatch { .. } => vec![
                "The compiler did not return one output per input".into(),
                "This is a bug in the compiler adapter or the compiler itself".into(),
            ],
            Self::Filesystem { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Check available disk space".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Discovery { .. } => ErrorCategory::NotFound,
            Self::Compilation { .. } => ErrorCategory::Validation,
            Self::OutputCountMismatch { .. } => ErrorCategory::Internal,
            Self::Filesystem { .. } => ErrorCategory::Internal,
        }
    }
}
