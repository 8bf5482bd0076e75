//! Application services.

pub mod compile_service;

pub use compile_service::{CompileService, CompileSummary};
