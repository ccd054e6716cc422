use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{import, include};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "funcpack")]
#[command(version = VERSION)]
#[command(about = "Inline shared common code into serverless function packages")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Include common code into a function, stripping the base package from
    /// its imports
    Include(include::IncludeArgs),
    /// Import common code into a function, renaming the common package to
    /// the function's own package
    Import(import::ImportArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let (json_result, exit_code) = match cli.command {
        Commands::Include(args) => output::map_cmd_result_to_json(include::run(args)),
        Commands::Import(args) => output::map_cmd_result_to_json(import::run(args)),
    };

    output::print_json_result(json_result);
    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
