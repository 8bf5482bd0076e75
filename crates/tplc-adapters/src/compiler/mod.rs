//! External compiler adapters.

pub mod command;
pub mod fake;

pub use command::CommandCompiler;
pub use fake::FakeCompiler;
