//! Declarative description of the templates to compile.

use std::path::{Path, PathBuf};

use super::error::DomainError;

/// A set of template source files: a base directory plus include/exclude
/// glob patterns.
///
/// Immutable once built. Pattern semantics are pinned down here so the
/// discoverer cannot drift:
///
/// - An **empty include list matches nothing**. It is never treated as
///   "match all"; a run over an empty file set compiles zero templates.
/// - Exclusions are applied after inclusions.
/// - Matching is evaluated against the path relative to `base_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSet {
    base_dir: PathBuf,
    include: Vec<String>,
    exclude: Vec<String>,
}

impl FileSet {
    /// Create an empty file set rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }

    /// Add one include pattern.
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include.push(pattern.into());
        self
    }

    /// Add one exclude pattern.
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude.push(pattern.into());
        self
    }

    /// Replace the include list wholesale.
    pub fn with_includes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the exclude list wholesale.
    pub fn with_excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn include_patterns(&self) -> &[String] {
        &self.include
    }

    pub fn exclude_patterns(&self) -> &[String] {
        &self.exclude
    }

    /// Check structural validity: no blank patterns, non-empty base dir.
    ///
    /// Filesystem existence of `base_dir` is the discoverer's concern, not
    /// the domain's.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.base_dir.as_os_str().is_empty() {
            return Err(DomainError::InvalidFileSet(
                "base directory is empty".into(),
            ));
        }
        if self.include.iter().any(|p| p.trim().is_empty()) {
            return Err(DomainError::BlankPattern { list: "include" });
        }
        if self.exclude.iter().any(|p| p.trim().is_empty()) {
            return Err(DomainError::BlankPattern { list: "exclude" });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_accumulates_patterns() {
        let set = FileSet::new("templates")
            .include("**/*.tpl")
            .include("extra/*.tpl")
            .exclude("**/draft/**");

        assert_eq!(set.base_dir(), Path::new("templates"));
        assert_eq!(set.include_patterns().len(), 2);
        assert_eq!(set.exclude_patterns(), &["**/draft/**".to_string()]);
    }

    #[test]
    fn with_includes_replaces() {
        let set = FileSet::new(".")
            .include("old")
            .with_includes(["**/*.tpl"]);
        assert_eq!(set.include_patterns(), &["**/*.tpl".to_string()]);
    }

    #[test]
    fn empty_include_list_is_valid() {
        // Matches nothing, but is not an error.
        assert!(FileSet::new("templates").validate().is_ok());
    }

    #[test]
    fn blank_include_pattern_is_invalid() {
        let set = FileSet::new("templates").include("  ");
        assert!(matches!(
            set.validate(),
            Err(DomainError::BlankPattern { list: "include" })
        ));
    }

    #[test]
    fn blank_exclude_pattern_is_invalid() {
        let set = FileSet::new("templates").include("*.tpl").exclude("");
        assert!(matches!(
            set.validate(),
            Err(DomainError::BlankPattern { list: "exclude" })
        ));
    }

    #[test]
    fn empty_base_dir_is_invalid() {
        assert!(FileSet::new("").validate().is_err());
    }
}
