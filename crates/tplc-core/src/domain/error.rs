use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (for retry logic)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid file set: {0}")]
    InvalidFileSet(String),

    #[error("Blank glob pattern in {list} list")]
    BlankPattern { list: &'static str },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Invalid compile-time global '{binding}': {reason}")]
    InvalidGlobal { binding: String, reason: String },

    #[error("Output suffix cannot be empty")]
    EmptySuffix,
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidFileSet(msg) => vec![
                "Check the [sources] section of your configuration".into(),
                format!("Details: {}", msg),
            ],
            Self::BlankPattern { list } => vec![
                format!("The {} pattern list contains an empty string", list),
                "Remove the blank entry or replace it with a real glob, e.g. **/*.tpl".into(),
            ],
            Self::AbsolutePathNotAllowed { path } => vec![
                format!("'{}' is absolute; template paths are always relative to the base directory", path),
            ],
            Self::InvalidGlobal { binding, .. } => vec![
                format!("Globals are KEY=VALUE pairs; got '{}'", binding),
                "Example: --global DEBUG=false".into(),
            ],
            Self::EmptySuffix => vec![
                "The output suffix is appended to every generated filename".into(),
                "Use the default '.js' or supply one with --suffix".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        // Every domain error today is a validation failure of user input.
        ErrorCategory::Validation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
