use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{preview, run, GlobalArgs};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "tagsync")]
#[command(version = VERSION)]
#[command(about = "Synchronize design entity version tags with document save versions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a versioning pass and save the document
    Run(run::RunArgs),
    /// Run a versioning pass, save, then export the document
    Export(run::RunArgs),
    /// Show what a pass would do without touching the document
    Preview(preview::PreviewArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let global = GlobalArgs {};
    let (json_result, exit_code) = commands::run_json(cli.command, &global);
    let _ = output::print_json_result(json_result);

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}
