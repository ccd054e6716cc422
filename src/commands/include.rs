use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use funcpack::inline::{self, FileChange, InlineRequest};
use funcpack::rewrite::{RewriteConfig, RewritePolicy};
use funcpack::Error;

use super::CmdResult;

#[derive(Args)]
pub struct IncludeArgs {
    /// Path of the function the common code will be included into
    pub function: PathBuf,

    /// Path to the common code to include
    pub to_import: PathBuf,

    /// Base package of the common code; this prefix is removed from imports
    /// in the function
    pub package: String,

    /// Preview the run without touching either tree
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Serialize)]
pub struct IncludeOutput {
    pub command: &'static str,
    pub function: String,
    pub to_import: String,
    pub package: String,
    pub dry_run: bool,
    pub files_scanned: usize,
    pub changes: Vec<FileChange>,
    pub dropped_lines: Vec<String>,
    pub files_copied: usize,
    pub applied: bool,
}

pub fn run(args: IncludeArgs) -> CmdResult<IncludeOutput> {
    for (field, path) in [("function", &args.function), ("to_import", &args.to_import)] {
        if !path.is_dir() {
            return Err(Error::validation_invalid_argument(
                field,
                format!("'{}' is not a valid directory", path.display()),
                Some(path.display().to_string()),
            ));
        }
    }

    let request = InlineRequest {
        function_dir: args.function.clone(),
        common_dir: args.to_import.clone(),
        config: RewriteConfig {
            base_package: args.package.clone(),
            policy: RewritePolicy::Strip,
        },
        dry_run: args.dry_run,
    };

    let result = inline::run(&request)?;

    // Dropped imports are destructive; echo each one to stdout so the
    // operator can see what was removed.
    for line in &result.dropped_lines {
        println!("{}", line);
    }

    Ok((
        IncludeOutput {
            command: "include",
            function: args.function.display().to_string(),
            to_import: args.to_import.display().to_string(),
            package: args.package,
            dry_run: args.dry_run,
            files_scanned: result.files_scanned,
            changes: result.changes,
            dropped_lines: result.dropped_lines,
            files_copied: result.files_copied,
            applied: result.applied,
        },
        0,
    ))
}
