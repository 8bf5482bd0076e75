//! In-memory compiler stub for tests and wiring checks.

use std::path::PathBuf;

use tplc_core::{
    application::{ApplicationError, ports::TemplateCompiler},
    domain::CompileOptions,
    error::TplcResult,
};

/// Deterministic stand-in for the external compiler.
///
/// Emits one banner line per input plus a `var` statement per global, so
/// tests can assert both positional pairing and option plumbing without a
/// real compiler on the PATH.
pub struct FakeCompiler {
    banner: String,
    fail_with: Option<String>,
}

impl FakeCompiler {
    pub fn new() -> Self {
        Self {
            banner: "// compiled from".into(),
            fail_with: None,
        }
    }

    /// Override the banner prefix.
    pub fn with_banner(mut self, banner: impl Into<String>) -> Self {
        self.banner = banner.into();
        self
    }

    /// A compiler that rejects every batch with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            banner: String::new(),
            fail_with: Some(message.into()),
        }
    }
}

impl Default for FakeCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateCompiler for FakeCompiler {
    fn compile(&self, files: &[PathBuf], options: &CompileOptions) -> TplcResult<Vec<String>> {
        if let Some(message) = &self.fail_with {
            return Err(ApplicationError::Compilation {
                reason: message.clone(),
            }
            .into());
        }

        Ok(files
            .iter()
            .map(|path| {
                let mut out = format!("{} {}\n", self.banner, path.display());
                for (key, value) in options.globals() {
                    out.push_str(&format!("var {key} = {value};\n"));
                }
                out
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_output_per_input_in_order() {
        let compiler = FakeCompiler::new();
        let files = vec![PathBuf::from("/t/a.tpl"), PathBuf::from("/t/b.tpl")];
        let out = compiler.compile(&files, &CompileOptions::default()).unwrap();

        assert_eq!(out.len(), 2);
        assert!(out[0].contains("/t/a.tpl"));
        assert!(out[1].contains("/t/b.tpl"));
    }

    #[test]
    fn globals_are_plumbed_through() {
        let compiler = FakeCompiler::new();
        let options = CompileOptions::new().global("DEBUG", "false");
        let out = compiler
            .compile(&[PathBuf::from("/t/a.tpl")], &options)
            .unwrap();
        assert!(out[0].contains("var DEBUG = false;"));
    }

    #[test]
    fn failing_compiler_rejects_whole_batch() {
        let compiler = FakeCompiler::failing("bad template");
        let err = compiler
            .compile(&[PathBuf::from("/t/a.tpl")], &CompileOptions::default())
            .unwrap_err();
        assert!(err.to_string().contains("bad template"));
    }
}
