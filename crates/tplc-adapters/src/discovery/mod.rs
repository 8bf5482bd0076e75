//! File-set resolution adapters.

pub mod glob;

pub use glob::GlobDiscoverer;
