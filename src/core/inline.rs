//! The include/import pipeline: rewrite imports in the function tree, then
//! merge the common tree over it.
//!
//! Each run is a single linear pass. Files are read whole, rewritten, and
//! written back before the merge-copy happens; the merge is the terminal,
//! irreversible step.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::merge;
use crate::rewrite::{LineAction, LineRewriter, RewriteConfig};
use crate::walker;

/// One pipeline invocation.
#[derive(Debug, Clone)]
pub struct InlineRequest {
    /// Function directory whose imports are rewritten (the merge target).
    pub function_dir: PathBuf,
    /// Common directory copied over the function tree (the merge source).
    pub common_dir: PathBuf,
    pub config: RewriteConfig,
    /// Preview the run without touching either tree.
    pub dry_run: bool,
}

/// Per-file rewrite summary.
#[derive(Debug, Clone, Serialize)]
pub struct FileChange {
    /// Path relative to the function directory.
    pub file: String,
    /// Lines rewritten in place.
    pub rewritten: usize,
    /// Lines dropped entirely.
    pub dropped: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineResult {
    pub files_scanned: usize,
    pub changes: Vec<FileChange>,
    /// Dropped import lines, in encounter order, for operator audit.
    pub dropped_lines: Vec<String>,
    pub files_copied: usize,
    /// Whether changes were written to disk.
    pub applied: bool,
}

/// Run the pipeline. Directory validity is the caller's responsibility; any
/// filesystem failure mid-run surfaces as an error with no rollback.
pub fn run(request: &InlineRequest) -> Result<InlineResult> {
    let rewriter = LineRewriter::new(request.config.clone());
    let files = walker::python_files(&request.function_dir)?;

    let mut changes = Vec::new();
    let mut dropped_lines = Vec::new();

    for file in &files {
        let content = fs::read_to_string(file).map_err(|e| {
            Error::internal_io(e.to_string(), Some(format!("read {}", file.display())))
        })?;

        let (new_content, rewritten, dropped) = rewrite_content(&rewriter, &content);
        if new_content == content {
            continue;
        }

        if !request.dry_run {
            fs::write(file, &new_content).map_err(|e| {
                Error::internal_io(e.to_string(), Some(format!("write {}", file.display())))
            })?;
        }

        let relative = relative_display(file, &request.function_dir);
        log_status!(
            "rewrite",
            "{}: {} rewritten, {} dropped",
            relative,
            rewritten,
            dropped.len()
        );

        changes.push(FileChange {
            file: relative,
            rewritten,
            dropped: dropped.len(),
        });
        dropped_lines.extend(dropped);
    }

    let files_copied = if request.dry_run {
        merge::file_count(&request.common_dir)?
    } else {
        merge::copy_tree(&request.common_dir, &request.function_dir)?
    };

    Ok(InlineResult {
        files_scanned: files.len(),
        changes,
        dropped_lines,
        files_copied,
        applied: !request.dry_run,
    })
}

/// Rewrite a whole file's content line by line. Returns the new content, the
/// count of modified lines, and the dropped lines.
fn rewrite_content(rewriter: &LineRewriter, content: &str) -> (String, usize, Vec<String>) {
    let mut kept: Vec<String> = Vec::new();
    let mut rewritten = 0;
    let mut dropped = Vec::new();

    for line in content.lines() {
        match rewriter.rewrite_line(line) {
            LineAction::Keep(out) => {
                if out != line {
                    rewritten += 1;
                }
                kept.push(out);
            }
            LineAction::Drop(line) => dropped.push(line),
        }
    }

    let mut result = kept.join("\n");
    if content.ends_with('\n') && !kept.is_empty() {
        result.push('\n');
    }

    (result, rewritten, dropped)
}

fn relative_display(file: &Path, root: &Path) -> String {
    file.strip_prefix(root)
        .unwrap_or(file)
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewrite::RewritePolicy;
    use tempfile::tempdir;

    fn strip_config(base: &str) -> RewriteConfig {
        RewriteConfig {
            base_package: base.to_string(),
            policy: RewritePolicy::Strip,
        }
    }

    #[test]
    fn test_rewrite_content_preserves_trailing_newline() {
        let rewriter = LineRewriter::new(strip_config("functions.common"));
        let (out, rewritten, dropped) = rewrite_content(
            &rewriter,
            "from functions.common.utils import helper\nx = 1\n",
        );
        assert_eq!(out, "from utils import helper\nx = 1\n");
        assert_eq!(rewritten, 1);
        assert!(dropped.is_empty());
    }

    #[test]
    fn test_rewrite_content_drops_lines() {
        let rewriter = LineRewriter::new(strip_config("functions.common"));
        let (out, rewritten, dropped) =
            rewrite_content(&rewriter, "import functions.common\nx = 1\n");
        assert_eq!(out, "x = 1\n");
        assert_eq!(rewritten, 0);
        assert_eq!(dropped, vec!["import functions.common".to_string()]);
    }

    #[test]
    fn test_rewrite_content_dropping_every_line_yields_empty() {
        let rewriter = LineRewriter::new(strip_config("functions.common"));
        let (out, _, dropped) = rewrite_content(&rewriter, "import functions.common\n");
        assert_eq!(out, "");
        assert_eq!(dropped.len(), 1);
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let function = tempdir().unwrap();
        let common = tempdir().unwrap();

        let handler = function.path().join("handler.py");
        let original = "from functions.common.utils import helper\n";
        fs::write(&handler, original).unwrap();
        fs::write(common.path().join("base.py"), "base").unwrap();

        let result = run(&InlineRequest {
            function_dir: function.path().to_path_buf(),
            common_dir: common.path().to_path_buf(),
            config: strip_config("functions.common"),
            dry_run: true,
        })
        .unwrap();

        assert!(!result.applied);
        assert_eq!(result.files_copied, 1);
        assert_eq!(result.changes.len(), 1);
        assert_eq!(fs::read_to_string(&handler).unwrap(), original);
        assert!(!function.path().join("base.py").exists());
    }

    #[test]
    fn test_run_rewrites_and_merges() {
        let function = tempdir().unwrap();
        let common = tempdir().unwrap();

        fs::write(
            function.path().join("handler.py"),
            "import functions.common\nfrom functions.common.utils import helper\n",
        )
        .unwrap();
        fs::create_dir_all(common.path().join("utils")).unwrap();
        fs::write(common.path().join("utils/helper.py"), "def helper(): pass\n").unwrap();

        let result = run(&InlineRequest {
            function_dir: function.path().to_path_buf(),
            common_dir: common.path().to_path_buf(),
            config: strip_config("functions.common"),
            dry_run: false,
        })
        .unwrap();

        assert!(result.applied);
        assert_eq!(result.dropped_lines, vec!["import functions.common"]);
        assert_eq!(
            fs::read_to_string(function.path().join("handler.py")).unwrap(),
            "from utils import helper\n"
        );
        assert!(function.path().join("utils/helper.py").exists());
    }
}
