//! The compile job: everything one pipeline run needs.

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::error::DomainError;
use super::file_set::FileSet;

/// Suffix appended to every generated filename unless overridden.
pub const DEFAULT_SUFFIX: &str = ".js";

/// Options forwarded opaquely to the external template compiler.
///
/// tplc attaches no semantics to these beyond plumbing them through; what a
/// namespace declaration or a doc comment means is the compiler's business.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileOptions {
    namespace_declarations: bool,
    doc_comments: bool,
    // BTreeMap keeps iteration (and therefore flag order) deterministic.
    globals: BTreeMap<String, String>,
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit namespace provide/require declarations in generated code.
    pub fn namespace_declarations(mut self, enabled: bool) -> Self {
        self.namespace_declarations = enabled;
        self
    }

    /// Emit doc comments in generated code.
    pub fn doc_comments(mut self, enabled: bool) -> Self {
        self.doc_comments = enabled;
        self
    }

    /// Bind one compile-time global. Later bindings win on duplicate keys.
    pub fn global(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.globals.insert(key.into(), value.into());
        self
    }

    /// Bind many compile-time globals at once.
    pub fn with_globals<I, K, V>(mut self, globals: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in globals {
            self.globals.insert(k.into(), v.into());
        }
        self
    }

    pub fn emits_namespace_declarations(&self) -> bool {
        self.namespace_declarations
    }

    pub fn emits_doc_comments(&self) -> bool {
        self.doc_comments
    }

    /// Globals in deterministic (key-sorted) order.
    pub fn globals(&self) -> impl Iterator<Item = (&str, &str)> {
        self.globals.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse a `KEY=VALUE` binding as accepted on the command line.
    pub fn parse_global(binding: &str) -> Result<(String, String), DomainError> {
        match binding.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.to_string()))
            }
            Some(_) => Err(DomainError::InvalidGlobal {
                binding: binding.into(),
                reason: "key is empty".into(),
            }),
            None => Err(DomainError::InvalidGlobal {
                binding: binding.into(),
                reason: "missing '='".into(),
            }),
        }
    }
}

/// What to do when one output file cannot be written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WritePolicy {
    /// Log the failure, record it in the summary, and keep writing the
    /// remaining files. The run still succeeds. This mirrors the historical
    /// behavior of the tool and can leave a partial output set behind.
    #[default]
    Continue,
    /// Abort the run on the first write failure.
    FailFast,
}

/// One pipeline invocation: sources, destination, and compiler options.
///
/// Passed by value into the service; there is no process-wide state.
#[derive(Debug, Clone, PartialEq)]
pub struct CompileJob {
    pub sources: FileSet,
    pub output_dir: PathBuf,
    pub suffix: String,
    pub options: CompileOptions,
    pub write_policy: WritePolicy,
}

impl CompileJob {
    /// Create a job with the default suffix, options, and write policy.
    pub fn new(sources: FileSet, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            sources,
            output_dir: output_dir.into(),
            suffix: DEFAULT_SUFFIX.into(),
            options: CompileOptions::default(),
            write_policy: WritePolicy::default(),
        }
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    pub fn write_policy(mut self, policy: WritePolicy) -> Self {
        self.write_policy = policy;
        self
    }

    /// Structural validation of the whole job.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.sources.validate()?;
        if self.suffix.is_empty() {
            return Err(DomainError::EmptySuffix);
        }
        Ok(())
    }
}
