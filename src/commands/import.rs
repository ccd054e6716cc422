use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use funcpack::inline::{self, FileChange, InlineRequest};
use funcpack::package::resolve_function_package;
use funcpack::rewrite::{RewriteConfig, RewritePolicy};
use funcpack::Error;

use super::CmdResult;

#[derive(Args)]
pub struct ImportArgs {
    /// Path of the function to import into
    #[arg(long, default_value = ".")]
    pub function: PathBuf,

    /// Path to the directory containing the common files
    #[arg(long, default_value = "../common")]
    pub common: PathBuf,

    /// Base package of the common code; this prefix is replaced with the
    /// function package
    #[arg(long, default_value = "functions.common")]
    pub common_package: String,

    /// Base package of the function; derived from the directory names when
    /// omitted
    #[arg(long)]
    pub function_package: Option<String>,

    /// Preview the run without touching either tree
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Serialize)]
pub struct ImportOutput {
    pub command: &'static str,
    pub function: String,
    pub common: String,
    pub common_package: String,
    pub function_package: String,
    pub dry_run: bool,
    pub files_scanned: usize,
    pub changes: Vec<FileChange>,
    pub files_copied: usize,
    pub applied: bool,
}

pub fn run(args: ImportArgs) -> CmdResult<ImportOutput> {
    for (field, path) in [("common", &args.common), ("function", &args.function)] {
        if !path.is_dir() {
            return Err(Error::validation_invalid_argument(
                field,
                format!("'{}' is not a valid directory", path.display()),
                Some(path.display().to_string()),
            ));
        }
    }

    let function_package = resolve_function_package(
        args.function_package.as_deref(),
        &args.common_package,
        &args.common,
        &args.function,
    )?;

    let request = InlineRequest {
        function_dir: args.function.clone(),
        common_dir: args.common.clone(),
        config: RewriteConfig {
            base_package: args.common_package.clone(),
            policy: RewritePolicy::Rename {
                function_package: function_package.clone(),
            },
        },
        dry_run: args.dry_run,
    };

    let result = inline::run(&request)?;

    Ok((
        ImportOutput {
            command: "import",
            function: args.function.display().to_string(),
            common: args.common.display().to_string(),
            common_package: args.common_package,
            function_package,
            dry_run: args.dry_run,
            files_scanned: result.files_scanned,
            changes: result.changes,
            files_copied: result.files_copied,
            applied: result.applied,
        },
        0,
    ))
}
