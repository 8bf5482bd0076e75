//! Compile Service - main application orchestrator.
//!
//! This service coordinates the entire batch compilation workflow:
//! 1. Resolve the file set into an ordered list of relative paths
//! 2. Compile the whole batch through the external compiler port
//! 3. Write one output file per input under the output root
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{FileDiscoverer, Filesystem, TemplateCompiler},
    },
    domain::{CompileJob, RelativePath, WritePolicy},
    error::{TplcError, TplcResult},
};

/// Outcome of one pipeline run.
///
/// `failed` is only ever non-empty under [`WritePolicy::Continue`]; with
/// `FailFast` the first write failure aborts the run instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompileSummary {
    /// Relative source paths whose output was written.
    pub written: Vec<RelativePath>,
    /// Relative source paths whose output could not be written, with the
    /// reason. The batch still counts as a success.
    pub failed: Vec<(RelativePath, String)>,
}

impl CompileSummary {
    /// True when every resolved template was written.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of templates the writer attempted.
    pub fn total(&self) -> usize {
        self.written.len() + self.failed.len()
    }
}

/// Main batch compilation service.
///
/// Orchestrates the discover, compile, and write workflow. Strictly
/// sequential, single pass: discoverer and compiler failures abort the run;
/// writer failures follow the job's [`WritePolicy`].
pub struct CompileService {
    discoverer: Box<dyn FileDiscoverer>,
    compiler: Box<dyn TemplateCompiler>,
    filesystem: Box<dyn Filesystem>,
}

impl CompileService {
    /// Create a new compile service with the given adapters.
    pub fn new(
        discoverer: Box<dyn FileDiscoverer>,
        compiler: Box<dyn TemplateCompiler>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            discoverer,
            compiler,
            filesystem,
        }
    }

    /// Run one compile job.
    ///
    /// This is the main use case - compiles every template the file set
    /// resolves to and mirrors the results under the output root.
    #[instrument(
        skip_all,
        fields(
            base = %job.sources.base_dir().display(),
            out = %job.output_dir.display(),
        )
    )]
    pub fn run(&self, job: &CompileJob) -> TplcResult<CompileSummary> {
        info!("Compiling template batch");

        // 1. Validate the job description
        job.validate().map_err(TplcError::Domain)?;

        // 2. Resolve the file set
        let resolved = self.discoverer.resolve(&job.sources)?;
        for file in &resolved {
            info!(template = %file, "Including template");
        }

        if resolved.is_empty() {
            info!("File set resolved to nothing; no compiler invocation");
            return Ok(CompileSummary::default());
        }

        // 3. Compile the whole batch in one call
        let absolute: Vec<PathBuf> = resolved
            .iter()
            .map(|rel| job.sources.base_dir().join(rel))
            .collect();
        let compiled = self.compiler.compile(&absolute, &job.options)?;

        // Positional pairing: entry i of `compiled` belongs to entry i of
        // `resolved`. A length mismatch means the contract is broken.
        if compiled.len() != resolved.len() {
            return Err(ApplicationError::OutputCountMismatch {
                expected: resolved.len(),
                actual: compiled.len(),
            }
            .into());
        }

        // 4. Write outputs, mirroring relative paths
        self.prepare_output_root(job)?;

        let mut summary = CompileSummary::default();
        for (rel, js) in resolved.into_iter().zip(compiled) {
            let target = job.output_dir.join(rel.with_appended(&job.suffix).as_path());
            match self.write_one(&target, &js) {
                Ok(()) => {
                    info!(file = %target.display(), "Wrote compiled template");
                    summary.written.push(rel);
                }
                Err(e) => match job.write_policy {
                    WritePolicy::FailFast => return Err(e),
                    WritePolicy::Continue => {
                        warn!(file = %target.display(), error = %e, "Write failed; continuing with remaining files");
                        summary.failed.push((rel, e.to_string()));
                    }
                },
            }
        }

        info!(
            written = summary.written.len(),
            failed = summary.failed.len(),
            "Batch compilation completed"
        );
        Ok(summary)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Create the output root up front.
    ///
    /// Under `Continue` a failure here is only logged: every subsequent
    /// per-file write will fail and be recorded individually, which keeps
    /// directory-creation failures on the same policy as write failures.
    fn prepare_output_root(&self, job: &CompileJob) -> TplcResult<()> {
        match self.filesystem.create_dir_all(&job.output_dir) {
            Ok(()) => {
                info!(dir = %job.output_dir.display(), "Output directory ready");
                Ok(())
            }
            Err(e) => match job.write_policy {
                WritePolicy::FailFast => Err(e),
                WritePolicy::Continue => {
                    warn!(dir = %job.output_dir.display(), error = %e, "Could not create output directory");
                    Ok(())
                }
            },
        }
    }

    /// Write one output file, creating its parent directories.
    fn write_one(&self, target: &Path, content: &str) -> TplcResult<()> {
        if let Some(parent) = target.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(target, content)
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::output::MockFilesystem;
    use crate::domain::{CompileOptions, FileSet};
    use std::collections::{HashMap, HashSet};
    use std::sync::{Arc, Mutex};

    // ── hand-rolled fakes ─────────────────────────────────────────────────
    //
    // Shared-state fakes follow the MemoryFilesystem shape: an Arc'd inner
    // behind the handle so a test can keep a clone for assertions after the
    // service has boxed its copy.

    /// Discoverer returning a fixed list (or a fixed error).
    struct StubDiscoverer {
        files: Vec<&'static str>,
        fail: bool,
    }

    impl StubDiscoverer {
        fn with(files: Vec<&'static str>) -> Self {
            Self { files, fail: false }
        }

        fn failing() -> Self {
            Self {
                files: Vec::new(),
                fail: true,
            }
        }
    }

    impl FileDiscoverer for StubDiscoverer {
        fn resolve(&self, sources: &FileSet) -> TplcResult<Vec<RelativePath>> {
            if self.fail {
                return Err(ApplicationError::Discovery {
                    path: sources.base_dir().to_path_buf(),
                    reason: "base directory does not exist".into(),
                }
                .into());
            }
            Ok(self.files.iter().map(|f| RelativePath::new(*f)).collect())
        }
    }

    /// Compiler producing `"js:<path>"` per input, recording every call.
    #[derive(Clone)]
    struct StubCompiler {
        calls: Arc<Mutex<Vec<Vec<PathBuf>>>>,
        outputs_override: Option<Vec<String>>,
        fail: bool,
    }

    impl StubCompiler {
        fn new() -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
                outputs_override: None,
                fail: false,
            }
        }

        fn with_outputs(outputs: Vec<String>) -> Self {
            Self {
                outputs_override: Some(outputs),
                ..Self::new()
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        fn paths_seen(&self) -> Vec<Vec<PathBuf>> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl TemplateCompiler for StubCompiler {
        fn compile(
            &self,
            files: &[PathBuf],
            _options: &CompileOptions,
        ) -> TplcResult<Vec<String>> {
            self.calls.lock().unwrap().push(files.to_vec());
            if self.fail {
                return Err(ApplicationError::Compilation {
                    reason: "template syntax error".into(),
                }
                .into());
            }
            if let Some(outputs) = &self.outputs_override {
                return Ok(outputs.clone());
            }
            Ok(files
                .iter()
                .map(|p| format!("js:{}", p.display()))
                .collect())
        }
    }

    /// Map-backed filesystem with per-path write fault injection.
    #[derive(Clone, Default)]
    struct MapFilesystem {
        inner: Arc<Mutex<HashMap<PathBuf, String>>>,
        fail_writes_to: Arc<HashSet<PathBuf>>,
    }

    impl MapFilesystem {
        fn new() -> Self {
            Self::default()
        }

        fn failing_on(path: &str) -> Self {
            let mut failing = HashSet::new();
            failing.insert(PathBuf::from(path));
            Self {
                fail_writes_to: Arc::new(failing),
                ..Self::default()
            }
        }

        fn read(&self, path: &str) -> Option<String> {
            self.inner.lock().unwrap().get(Path::new(path)).cloned()
        }

        fn file_count(&self) -> usize {
            self.inner.lock().unwrap().len()
        }
    }

    impl Filesystem for MapFilesystem {
        fn create_dir_all(&self, _path: &Path) -> TplcResult<()> {
            Ok(())
        }

        fn write_file(&self, path: &Path, content: &str) -> TplcResult<()> {
            if self.fail_writes_to.contains(path) {
                return Err(ApplicationError::Filesystem {
                    path: path.to_path_buf(),
                    reason: "permission denied".into(),
                }
                .into());
            }
            self.inner
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), content.to_string());
            Ok(())
        }

        fn exists(&self, path: &Path) -> bool {
            self.inner.lock().unwrap().contains_key(path)
        }
    }

    fn service(
        discoverer: StubDiscoverer,
        compiler: StubCompiler,
        fs: MapFilesystem,
    ) -> CompileService {
        CompileService::new(Box::new(discoverer), Box::new(compiler), Box::new(fs))
    }

    fn job(base: &str, out: &str) -> CompileJob {
        CompileJob::new(FileSet::new(base).include("**/*.tpl"), out)
    }

    // ── happy path / pairing law ──────────────────────────────────────────

    #[test]
    fn outputs_mirror_relative_paths_with_suffix() {
        let fs = MapFilesystem::new();
        let svc = service(
            StubDiscoverer::with(vec!["a.tpl", "sub/b.tpl"]),
            StubCompiler::new(),
            fs.clone(),
        );

        let summary = svc.run(&job("templates", "out")).unwrap();

        assert_eq!(summary.written.len(), 2);
        assert!(summary.is_clean());
        assert_eq!(fs.read("out/a.tpl.js").unwrap(), "js:templates/a.tpl");
        assert_eq!(
            fs.read("out/sub/b.tpl.js").unwrap(),
            "js:templates/sub/b.tpl"
        );
    }

    #[test]
    fn compiler_receives_absolute_paths_in_resolved_order() {
        let compiler = StubCompiler::new();
        let svc = service(
            StubDiscoverer::with(vec!["a.tpl", "sub/b.tpl"]),
            compiler.clone(),
            MapFilesystem::new(),
        );

        svc.run(&job("templates", "out")).unwrap();

        let calls = compiler.paths_seen();
        assert_eq!(calls.len(), 1, "one invocation per batch");
        assert_eq!(
            calls[0],
            vec![
                PathBuf::from("templates/a.tpl"),
                PathBuf::from("templates/sub/b.tpl")
            ]
        );
    }

    #[test]
    fn custom_suffix_is_appended() {
        let fs = MapFilesystem::new();
        let svc = service(
            StubDiscoverer::with(vec!["a.tpl"]),
            StubCompiler::new(),
            fs.clone(),
        );

        let job = job("templates", "out").suffix(".mjs");
        svc.run(&job).unwrap();

        assert!(fs.read("out/a.tpl.mjs").is_some());
    }

    // ── invariants ────────────────────────────────────────────────────────

    #[test]
    fn count_mismatch_is_fatal() {
        let fs = MapFilesystem::new();
        let svc = service(
            StubDiscoverer::with(vec!["a.tpl", "b.tpl"]),
            StubCompiler::with_outputs(vec!["only one".into()]),
            fs.clone(),
        );

        let err = svc.run(&job("templates", "out")).unwrap_err();
        assert!(matches!(
            err,
            TplcError::Application(ApplicationError::OutputCountMismatch {
                expected: 2,
                actual: 1
            })
        ));
        assert_eq!(fs.file_count(), 0, "nothing may be written on mismatch");
    }

    #[test]
    fn empty_resolution_skips_compiler() {
        let fs = MapFilesystem::new();
        let compiler = StubCompiler::new();
        let svc = service(StubDiscoverer::with(vec![]), compiler.clone(), fs.clone());

        let summary = svc.run(&job("templates", "out")).unwrap();

        assert_eq!(summary, CompileSummary::default());
        assert_eq!(fs.file_count(), 0);
        assert_eq!(compiler.call_count(), 0);
    }

    // ── failure propagation ───────────────────────────────────────────────

    #[test]
    fn discovery_failure_aborts_before_compilation() {
        let compiler = StubCompiler::new();
        let svc = service(
            StubDiscoverer::failing(),
            compiler.clone(),
            MapFilesystem::new(),
        );

        let err = svc.run(&job("missing", "out")).unwrap_err();
        assert!(matches!(
            err,
            TplcError::Application(ApplicationError::Discovery { .. })
        ));
        assert_eq!(compiler.call_count(), 0);
    }

    #[test]
    fn compiler_failure_aborts_whole_batch_before_writes() {
        let fs = MapFilesystem::new();
        let svc = service(
            StubDiscoverer::with(vec!["a.tpl", "b.tpl"]),
            StubCompiler::failing(),
            fs.clone(),
        );

        let err = svc.run(&job("templates", "out")).unwrap_err();
        assert!(matches!(
            err,
            TplcError::Application(ApplicationError::Compilation { .. })
        ));
        assert_eq!(fs.file_count(), 0, "compilation precedes all writes");
    }

    #[test]
    fn invalid_job_rejected_before_discovery() {
        let svc = service(
            StubDiscoverer::with(vec!["a.tpl"]),
            StubCompiler::new(),
            MapFilesystem::new(),
        );

        let bad = CompileJob::new(FileSet::new("templates").include(""), "out");
        assert!(matches!(svc.run(&bad), Err(TplcError::Domain(_))));
    }

    // ── write policy ──────────────────────────────────────────────────────

    #[test]
    fn continue_policy_keeps_writing_after_failure() {
        let fs = MapFilesystem::failing_on("out/b.tpl.js");
        let svc = service(
            StubDiscoverer::with(vec!["a.tpl", "b.tpl", "c.tpl"]),
            StubCompiler::new(),
            fs.clone(),
        );

        let summary = svc.run(&job("templates", "out")).unwrap();

        assert_eq!(summary.written.len(), 2);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].0.as_str(), "b.tpl");
        assert!(fs.read("out/a.tpl.js").is_some());
        assert!(fs.read("out/b.tpl.js").is_none());
        assert!(fs.read("out/c.tpl.js").is_some());
    }

    #[test]
    fn fail_fast_policy_aborts_on_first_failure() {
        let fs = MapFilesystem::failing_on("out/b.tpl.js");
        let svc = service(
            StubDiscoverer::with(vec!["a.tpl", "b.tpl", "c.tpl"]),
            StubCompiler::new(),
            fs.clone(),
        );

        let job = job("templates", "out").write_policy(WritePolicy::FailFast);
        let err = svc.run(&job).unwrap_err();

        assert!(matches!(
            err,
            TplcError::Application(ApplicationError::Filesystem { .. })
        ));
        // a.tpl precedes the failure and is already on disk.
        assert!(fs.read("out/a.tpl.js").is_some());
        assert!(fs.read("out/c.tpl.js").is_none());
    }

    // ── mockall-based port check ──────────────────────────────────────────

    #[test]
    fn filesystem_port_sees_one_write_per_template() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().times(2).returning(|_, _| Ok(()));
        fs.expect_exists().return_const(false);

        let svc = CompileService::new(
            Box::new(StubDiscoverer::with(vec!["a.tpl", "sub/b.tpl"])),
            Box::new(StubCompiler::new()),
            Box::new(fs),
        );

        let summary = svc.run(&job("templates", "out")).unwrap();
        assert_eq!(summary.written.len(), 2);
    }
}
