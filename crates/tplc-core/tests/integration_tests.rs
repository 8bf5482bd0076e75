//! Integration tests for tplc-core.
//!
//! Exercises the public API surface end to end with in-process fakes; the
//! real adapters get their own tests in `tplc-adapters`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tplc_core::{
    application::{
        ApplicationError, CompileService,
        ports::{FileDiscoverer, Filesystem, TemplateCompiler},
    },
    domain::{CompileJob, CompileOptions, FileSet, RelativePath},
    error::{TplcError, TplcResult},
};

struct FixedDiscoverer(Vec<&'static str>);

impl FileDiscoverer for FixedDiscoverer {
    fn resolve(&self, _sources: &FileSet) -> TplcResult<Vec<RelativePath>> {
        Ok(self.0.iter().map(|f| RelativePath::new(*f)).collect())
    }
}

struct BannerCompiler;

impl TemplateCompiler for BannerCompiler {
    fn compile(&self, files: &[PathBuf], options: &CompileOptions) -> TplcResult<Vec<String>> {
        Ok(files
            .iter()
            .map(|p| {
                let mut out = format!("// generated from {}\n", p.display());
                for (k, v) in options.globals() {
                    out.push_str(&format!("var {k} = {v};\n"));
                }
                out
            })
            .collect())
    }
}

#[derive(Clone, Default)]
struct RecordingFilesystem {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
}

impl Filesystem for RecordingFilesystem {
    fn create_dir_all(&self, _path: &Path) -> TplcResult<()> {
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> TplcResult<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }
}

#[test]
fn full_pipeline_workflow() {
    let filesystem = RecordingFilesystem::default();
    let service = CompileService::new(
        Box::new(FixedDiscoverer(vec!["a.tpl", "sub/b.tpl"])),
        Box::new(BannerCompiler),
        Box::new(filesystem.clone()),
    );

    let sources = FileSet::new("templates").include("**/*.tpl");
    let options = CompileOptions::new().global("DEBUG", "false");
    let job = CompileJob::new(sources, "generated/js").options(options);

    let summary = service.run(&job).unwrap();

    assert!(summary.is_clean());
    assert_eq!(summary.total(), 2);
    assert!(filesystem.exists("generated/js/a.tpl.js".as_ref()));
    assert!(filesystem.exists("generated/js/sub/b.tpl.js".as_ref()));

    let content = filesystem
        .files
        .lock()
        .unwrap()
        .get(Path::new("generated/js/a.tpl.js"))
        .cloned()
        .unwrap();
    assert!(content.contains("templates/a.tpl"));
    assert!(content.contains("var DEBUG = false;"));
}

#[test]
fn rerun_overwrites_instead_of_appending() {
    let filesystem = RecordingFilesystem::default();
    let service = CompileService::new(
        Box::new(FixedDiscoverer(vec!["a.tpl"])),
        Box::new(BannerCompiler),
        Box::new(filesystem.clone()),
    );

    let job = CompileJob::new(FileSet::new("templates").include("**/*.tpl"), "out");

    service.run(&job).unwrap();
    let first = filesystem
        .files
        .lock()
        .unwrap()
        .get(Path::new("out/a.tpl.js"))
        .cloned()
        .unwrap();

    service.run(&job).unwrap();
    let second = filesystem
        .files
        .lock()
        .unwrap()
        .get(Path::new("out/a.tpl.js"))
        .cloned()
        .unwrap();

    assert_eq!(first, second);
}

#[test]
fn count_mismatch_surfaces_as_application_error() {
    struct ShortCompiler;
    impl TemplateCompiler for ShortCompiler {
        fn compile(&self, _: &[PathBuf], _: &CompileOptions) -> TplcResult<Vec<String>> {
            Ok(vec![])
        }
    }

    let service = CompileService::new(
        Box::new(FixedDiscoverer(vec!["a.tpl"])),
        Box::new(ShortCompiler),
        Box::new(RecordingFilesystem::default()),
    );

    let job = CompileJob::new(FileSet::new("templates").include("**/*.tpl"), "out");
    let err = service.run(&job).unwrap_err();
    assert!(matches!(
        err,
        TplcError::Application(ApplicationError::OutputCountMismatch { .. })
    ));
}
