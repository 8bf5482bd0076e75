//! Glob-based file discovery over a real directory tree.

use std::path::Path;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::debug;
use walkdir::WalkDir;

use tplc_core::{
    application::{ApplicationError, ports::FileDiscoverer},
    domain::{FileSet, RelativePath},
    error::{TplcError, TplcResult},
};

/// Production discoverer: walks the base directory and matches the
/// include/exclude globs against each file's base-relative path.
///
/// Results are sorted lexicographically, so two calls against an unchanged
/// tree return the identical ordered list. `*` is allowed to match across
/// path separators, so `*.tpl` also picks up `sub/b.tpl`.
#[derive(Debug, Clone, Copy)]
pub struct GlobDiscoverer;

impl GlobDiscoverer {
    /// Create a new glob discoverer.
    pub fn new() -> Self {
        Self
    }
}

impl Default for GlobDiscoverer {
    fn default() -> Self {
        Self::new()
    }
}

impl FileDiscoverer for GlobDiscoverer {
    fn resolve(&self, sources: &FileSet) -> TplcResult<Vec<RelativePath>> {
        let base = sources.base_dir();
        if !base.is_dir() {
            return Err(ApplicationError::Discovery {
                path: base.to_path_buf(),
                reason: "base directory does not exist or is not a directory".into(),
            }
            .into());
        }

        // Empty include list matches nothing; skip the walk entirely.
        let Some(include) = compile_globset(sources.include_patterns())? else {
            debug!(base = %base.display(), "Include list is empty; resolving to nothing");
            return Ok(Vec::new());
        };
        let exclude = compile_globset(sources.exclude_patterns())?;

        let mut matched = Vec::new();
        for entry in WalkDir::new(base).follow_links(false) {
            let entry = entry.map_err(|e| ApplicationError::Discovery {
                path: base.to_path_buf(),
                reason: e.to_string(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = match entry.path().strip_prefix(base) {
                Ok(rel) => rel,
                Err(_) => continue,
            };

            if let Some(exclude) = &exclude {
                if exclude.is_match(relative) {
                    continue;
                }
            }
            if include.is_match(relative) {
                matched.push(RelativePath::new(relative));
            }
        }

        matched.sort();
        debug!(base = %base.display(), count = matched.len(), "File set resolved");
        Ok(matched)
    }
}

/// Compile a pattern list into a single matcher.
///
/// Returns `None` for an empty list so callers can distinguish "no patterns"
/// from "patterns that match nothing".
fn compile_globset(patterns: &[String]) -> TplcResult<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(false)
            .build()
            .map_err(|err| TplcError::Configuration {
                message: format!("Invalid glob pattern '{pattern}': {err}"),
            })?;
        builder.add(glob);
    }

    builder
        .build()
        .map(Some)
        .map_err(|err| TplcError::Configuration {
            message: format!("Failed to build glob set: {err}"),
        })
}
