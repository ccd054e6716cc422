//! Function package derivation for the rename policy.

use std::path::Path;

use crate::error::{Error, Result};

/// Resolve the package path that replaces the common package.
///
/// An explicit package wins verbatim. Otherwise the common directory's name
/// must appear inside the common package string, and the function package is
/// derived by substituting the function directory's name for it:
/// `functions.common` + `.../functions/my_func` derives `functions.my_func`.
///
/// Fails before any file is touched when the derivation is ambiguous.
pub fn resolve_function_package(
    explicit: Option<&str>,
    common_package: &str,
    common_dir: &Path,
    function_dir: &Path,
) -> Result<String> {
    if let Some(package) = explicit {
        return Ok(package.to_string());
    }

    let common_name = dir_name(common_dir)?;
    let function_name = dir_name(function_dir)?;

    if !common_package.contains(&common_name) {
        return Err(Error::package_unresolvable(
            common_package,
            common_dir.display().to_string(),
        ));
    }

    // Single literal substring replacement, not a structural package-path
    // transform.
    Ok(common_package.replacen(&common_name, &function_name, 1))
}

/// Final path segment of a directory, from its canonicalized form so that
/// `.` and `..` arguments resolve to a real name.
fn dir_name(dir: &Path) -> Result<String> {
    let canonical = dir.canonicalize().map_err(|e| {
        Error::internal_io(e.to_string(), Some(format!("resolve {}", dir.display())))
    })?;

    canonical
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .ok_or_else(|| {
            Error::validation_invalid_argument(
                "directory",
                format!("'{}' has no final path segment", dir.display()),
                Some(dir.display().to_string()),
            )
        })
}
