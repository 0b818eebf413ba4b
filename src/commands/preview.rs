use clap::Args;
use std::path::PathBuf;

use tagsync::config::PassConfig;
use tagsync::document::JsonDocument;
use tagsync::pass::{self, PassOptions, PassSummary};

use super::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct PreviewArgs {
    /// Path to the design document JSON file
    pub document: PathBuf,

    /// Config file path (defaults to tagsync.json beside the document)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: PreviewArgs, _global: &GlobalArgs) -> CmdResult<PassSummary> {
    let config = PassConfig::load(args.config.as_deref(), &args.document)?;
    let export_dir = config.resolved_export_dir(&args.document);
    let mut host = JsonDocument::load(&args.document, &export_dir)?;

    let options = PassOptions {
        rename_bodies: config.rename_bodies,
        perform_export: false,
        dry_run: true,
        comment: None,
        message_tag: config.message_tag.clone(),
    };

    let summary = pass::run_pass(&mut host, &options)?;
    Ok((summary, 0))
}
