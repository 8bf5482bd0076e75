//! Tplc Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the tplc
//! batch template compiler, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            tplc-cli (CLI)               │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │            (CompileService)             │
//! │   Orchestrates Discover→Compile→Write   │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (FileDiscoverer, TemplateCompiler, Fs)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     tplc-adapters (Infrastructure)      │
//! │ (GlobDiscoverer, CommandCompiler, etc)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (FileSet, CompileJob, CompileOptions)  │
//! │         No External Dependencies        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tplc_core::{
//!     application::CompileService,
//!     domain::{CompileJob, FileSet},
//! };
//!
//! // 1. Describe the batch
//! let sources = FileSet::new("templates").include("**/*.tpl");
//! let job = CompileJob::new(sources, "generated/js");
//!
//! // 2. Use application service (with injected adapters)
//! let service = CompileService::new(discoverer, compiler, filesystem);
//! let summary = service.run(&job).unwrap();
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CompileService, CompileSummary,
        ports::{FileDiscoverer, Filesystem, TemplateCompiler},
    };
    pub use crate::domain::{
        CompileJob, CompileOptions, FileSet, RelativePath, WritePolicy,
    };
    pub use crate::error::{TplcError, TplcResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
