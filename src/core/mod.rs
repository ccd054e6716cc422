// Public modules
pub mod error;
pub mod inline;
pub mod merge;
pub mod package;
pub mod rewrite;
pub mod walker;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
