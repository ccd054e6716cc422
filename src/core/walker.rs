//! Source file enumeration for the rewrite pass.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Enumerate every `.py` file under `root`, recursively.
///
/// Traversal order is whatever the filesystem yields; rewriting is
/// line-scoped, so no ordering guarantee is needed.
pub fn python_files(root: &Path) -> Result<Vec<PathBuf>> {
    let pattern = root.join("**").join("*.py");
    let pattern = pattern.to_string_lossy();

    let files = glob::glob(&pattern)
        .map_err(|e| {
            Error::validation_invalid_argument(
                "function",
                format!("Invalid search pattern '{}': {}", pattern, e),
                Some(root.display().to_string()),
            )
        })?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect();

    Ok(files)
}
