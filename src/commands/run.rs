use clap::Args;
use std::path::PathBuf;

use tagsync::config::PassConfig;
use tagsync::document::JsonDocument;
use tagsync::pass::{self, ExportStatus, PassOptions, PassSummary, SaveStatus};

use super::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct RunArgs {
    /// Path to the design document JSON file
    pub document: PathBuf,

    /// Optional comment appended to the save's commit message
    #[arg(long)]
    pub message: Option<String>,

    /// Config file path (defaults to tagsync.json beside the document)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: RunArgs, _global: &GlobalArgs) -> CmdResult<PassSummary> {
    execute(&args, false)
}

pub fn run_export(args: RunArgs, _global: &GlobalArgs) -> CmdResult<PassSummary> {
    execute(&args, true)
}

fn execute(args: &RunArgs, perform_export: bool) -> CmdResult<PassSummary> {
    let config = PassConfig::load(args.config.as_deref(), &args.document)?;
    let export_dir = config.resolved_export_dir(&args.document);
    let mut host = JsonDocument::load(&args.document, &export_dir)?;

    let options = PassOptions {
        rename_bodies: config.rename_bodies,
        perform_export,
        dry_run: false,
        comment: args.message.clone(),
        message_tag: config.message_tag.clone(),
    };

    let summary = pass::run_pass(&mut host, &options)?;

    // Entity-level skips never fail the command; a failed save or export
    // does, since the document is now out of sync with its tags.
    let save_failed = matches!(summary.save, SaveStatus::Failed { .. });
    let export_failed = matches!(summary.export, Some(ExportStatus::Failed { .. }));
    let exit_code = if save_failed || export_failed { 1 } else { 0 };

    Ok((summary, exit_code))
}
