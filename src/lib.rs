/// multivalue library
///
/// An in-memory store mapping each key to a set of unique members, plus the
/// line-oriented interpreter that drives it.

pub mod config;
pub mod core;
pub mod error;
pub mod store;

// Re-exports for convenience
pub use config::ReplConfig;
pub use error::{CommandError, CommandResult, MultiValueError, Result};
pub use store::MultiValueStore;
