//! The versioning pass: traversal, rename application, save and export.
//!
//! One pass walks every component and body in the document, applies the
//! planner's decision per entity, then triggers a save so the document
//! version catches up with the freshly written tags. Entity-level rename
//! rejections never abort the pass; they are recorded as skips.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::host::{BodyId, ComponentId, DesignHost, RenameOutcome};
use crate::planner::{self, Plan, SkipReason};
use crate::prefix;
use crate::utils::validation;
use crate::log_status;

/// Knobs for one pass. Built by the CLI from config + arguments.
#[derive(Debug, Clone)]
pub struct PassOptions {
    /// Whether bodies are visited at all (config toggle, default true).
    pub rename_bodies: bool,
    /// Run the host's export step after a successful pass.
    pub perform_export: bool,
    /// Plan only: no renames applied, no save.
    pub dry_run: bool,
    /// Optional user comment appended to the commit message.
    pub comment: Option<String>,
    /// Tag prepended to generated commit messages.
    pub message_tag: String,
}

impl Default for PassOptions {
    fn default() -> Self {
        Self {
            rename_bodies: true,
            perform_export: false,
            dry_run: false,
            comment: None,
            message_tag: "[tagsync]".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Component,
    Body,
}

/// What happened to one entity during the pass.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityOutcome {
    pub kind: EntityKind,
    pub old_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum SaveStatus {
    Saved { version: u64, message: String },
    Skipped { reason: String },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum ExportStatus {
    Exported { target: String },
    Skipped { reason: String },
    Failed { error: String },
}

/// Result of one pass, serialized as the CLI's data payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassSummary {
    pub file_name: String,
    pub prefix: String,
    pub target_version: u64,
    pub components_renamed: usize,
    pub components_skipped: usize,
    pub bodies_renamed: usize,
    pub bodies_skipped: usize,
    pub entities: Vec<EntityOutcome>,
    pub save: SaveStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<ExportStatus>,
}

impl PassSummary {
    pub fn renamed_total(&self) -> usize {
        self.components_renamed + self.bodies_renamed
    }
}

enum EntityRef {
    Component(ComponentId),
    Body(BodyId),
}

/// Run one versioning pass against the host document.
///
/// Preconditions (nothing touched on failure): the document must have been
/// saved at least once, and its filename must yield a valid prefix. The
/// target version is `current + 1`, computed once and reused for every
/// entity so the tags match the version the trailing save produces.
pub fn run_pass(host: &mut dyn DesignHost, options: &PassOptions) -> Result<PassSummary> {
    if host.never_saved() {
        return Err(Error::document_never_saved(host.file_name()));
    }

    let file_name = host.file_name().to_string();
    let prefix = prefix::extract(&file_name)?;
    let current_version = host.version_number();
    let target_version = current_version + 1;

    log_status!(
        "pass",
        "Tagging {}* entities with v{} (current v{})",
        prefix,
        target_version,
        current_version
    );

    // Every entity's old name is captured before any mutation, so one
    // rename is never visible as another entity's input.
    let mut snapshot: Vec<(EntityRef, String, bool)> = Vec::new();
    for component in host.component_ids() {
        let is_root = host.is_root_component(component);
        snapshot.push((
            EntityRef::Component(component),
            host.component_name(component),
            is_root,
        ));

        if options.rename_bodies {
            for body in host.body_ids(component) {
                snapshot.push((EntityRef::Body(body), host.body_name(body), false));
            }
        }
    }

    let mut entities = Vec::new();
    let mut components_renamed = 0;
    let mut components_skipped = 0;
    let mut bodies_renamed = 0;
    let mut bodies_skipped = 0;

    for (entity, old_name, is_root) in snapshot {
        let kind = match entity {
            EntityRef::Component(_) => EntityKind::Component,
            EntityRef::Body(_) => EntityKind::Body,
        };

        let plan = planner::plan(&old_name, is_root, &prefix, target_version);
        let outcome = match plan {
            Plan::Rename(new_name) => {
                let applied = if options.dry_run {
                    RenameOutcome::Applied
                } else {
                    match entity {
                        EntityRef::Component(id) => host.rename_component(id, &new_name),
                        EntityRef::Body(id) => host.rename_body(id, &new_name),
                    }
                };

                match applied {
                    RenameOutcome::Applied => EntityOutcome {
                        kind,
                        old_name,
                        new_name: Some(new_name),
                        skipped: None,
                    },
                    RenameOutcome::Rejected(reason) => {
                        log_status!("pass", "Host rejected rename of {}: {}", old_name, reason);
                        EntityOutcome {
                            kind,
                            old_name,
                            new_name: None,
                            skipped: Some(SkipReason::Rejected(reason).describe()),
                        }
                    }
                }
            }
            Plan::Skip(reason) => EntityOutcome {
                kind,
                old_name,
                new_name: None,
                skipped: Some(reason.describe()),
            },
        };

        match (kind, outcome.new_name.is_some()) {
            (EntityKind::Component, true) => components_renamed += 1,
            (EntityKind::Component, false) => components_skipped += 1,
            (EntityKind::Body, true) => bodies_renamed += 1,
            (EntityKind::Body, false) => bodies_skipped += 1,
        }

        entities.push(outcome);
    }

    let renamed_total = components_renamed + bodies_renamed;
    let save = trigger_save(host, options, &prefix, target_version, renamed_total);
    let export = trigger_export(host, options, &save);

    Ok(PassSummary {
        file_name,
        prefix,
        target_version,
        components_renamed,
        components_skipped,
        bodies_renamed,
        bodies_skipped,
        entities,
        save,
        export,
    })
}

/// Save the document so its version matches the tags just written.
///
/// Skipped when nothing was renamed (advancing the version with no new tags
/// would desynchronize them). A failed save with a user comment is retried
/// once with the default message; renames stay in place either way.
fn trigger_save(
    host: &mut dyn DesignHost,
    options: &PassOptions,
    prefix: &str,
    target_version: u64,
    renamed_total: usize,
) -> SaveStatus {
    if options.dry_run {
        return SaveStatus::Skipped {
            reason: "dry run".to_string(),
        };
    }
    if renamed_total == 0 {
        return SaveStatus::Skipped {
            reason: "nothing renamed".to_string(),
        };
    }

    let default_message =
        default_commit_message(&options.message_tag, target_version, renamed_total, prefix);
    let message = match options.comment.as_deref().and_then(validation::sanitize_comment) {
        Some(comment) => format!("{} - {}", default_message, comment),
        None => default_message.clone(),
    };

    match host.save(&message) {
        Ok(version) => {
            log_status!("save", "Document saved as v{}", version);
            SaveStatus::Saved { version, message }
        }
        Err(err) if message != default_message => {
            log_status!(
                "save",
                "Save with comment failed ({}), retrying with default message",
                err
            );
            match host.save(&default_message) {
                Ok(version) => SaveStatus::Saved {
                    version,
                    message: default_message,
                },
                Err(retry_err) => SaveStatus::Failed {
                    error: retry_err.to_string(),
                },
            }
        }
        Err(err) => SaveStatus::Failed {
            error: err.to_string(),
        },
    }
}

fn trigger_export(
    host: &mut dyn DesignHost,
    options: &PassOptions,
    save: &SaveStatus,
) -> Option<ExportStatus> {
    if !options.perform_export {
        return None;
    }

    Some(match save {
        SaveStatus::Skipped { reason } if reason == "dry run" => ExportStatus::Skipped {
            reason: "dry run".to_string(),
        },
        SaveStatus::Failed { .. } => ExportStatus::Skipped {
            reason: "save failed".to_string(),
        },
        _ => match host.export() {
            Ok(target) => {
                log_status!("export", "Exported to {}", target);
                ExportStatus::Exported { target }
            }
            Err(err) => ExportStatus::Failed {
                error: err.to_string(),
            },
        },
    })
}

fn default_commit_message(tag: &str, version: u64, renamed: usize, prefix: &str) -> String {
    format!(
        "{} Auto-versioned to v{} ({} {} entities)",
        tag, version, renamed, prefix
    )
}
