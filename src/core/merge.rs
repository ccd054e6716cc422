//! Directory merge-copy, the terminal step that inlines the common tree.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Copy every file and subdirectory under `source` into `target` at matching
/// relative paths. Existing target files with the same relative path are
/// overwritten; files unique to the target are left untouched; missing
/// target directories are created. Returns the number of files copied.
///
/// There is no rollback: a failure mid-copy leaves a partially merged tree.
pub fn copy_tree(source: &Path, target: &Path) -> Result<usize> {
    if !target.exists() {
        fs::create_dir_all(target).map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("create {}", target.display())))
        })?;
    }

    let entries = fs::read_dir(source).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("list {}", source.display())))
    })?;

    let mut copied = 0;
    for entry in entries {
        let entry = entry.map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("list {}", source.display())))
        })?;
        let source_path = entry.path();
        let target_path = target.join(entry.file_name());

        if source_path.is_dir() {
            copied += copy_tree(&source_path, &target_path)?;
        } else {
            fs::copy(&source_path, &target_path).map_err(|e| {
                Error::internal_io(
                    e.to_string(),
                    Some(format!(
                        "copy {} -> {}",
                        source_path.display(),
                        target_path.display()
                    )),
                )
            })?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Count the files a merge from `source` would copy, without copying.
pub fn file_count(source: &Path) -> Result<usize> {
    let entries = fs::read_dir(source).map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("list {}", source.display())))
    })?;

    let mut count = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            count += file_count(&path)?;
        } else {
            count += 1;
        }
    }

    Ok(count)
}
