//! End-to-end pass flow against a JSON-backed document on disk.

use std::fs;
use std::path::Path;

use tagsync::config::PassConfig;
use tagsync::document::JsonDocument;
use tagsync::pass::{run_pass, ExportStatus, PassOptions, SaveStatus};
use tagsync::DesignHost;

const DOCUMENT: &str = r#"{
    "fileName": "dpx_widget",
    "version": 3,
    "root": {
        "name": "dpx_widget",
        "bodies": ["dpx_base", "std_screw"],
        "children": [
            {"name": "dpx_lever"},
            {"name": "dpx_bracket_v2"},
            {"name": "dpx_vertical_mount"}
        ]
    }
}"#;

fn write_document(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("dpx_widget.json");
    fs::write(&path, DOCUMENT).unwrap();
    path
}

fn load(path: &Path) -> JsonDocument {
    let export_dir = PassConfig::default().resolved_export_dir(path);
    JsonDocument::load(path, &export_dir).unwrap()
}

fn component_names(doc: &JsonDocument) -> Vec<String> {
    doc.component_ids()
        .into_iter()
        .map(|id| doc.component_name(id))
        .collect()
}

#[test]
fn run_renames_saves_and_persists() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_document(dir.path());

    let mut host = load(&path);
    let summary = run_pass(&mut host, &PassOptions::default()).unwrap();

    assert_eq!(summary.prefix, "dpx_");
    assert_eq!(summary.target_version, 4);
    assert_eq!(summary.components_renamed, 3);
    assert_eq!(summary.bodies_renamed, 1);
    assert_eq!(summary.bodies_skipped, 1);
    assert!(matches!(summary.save, SaveStatus::Saved { version: 4, .. }));

    // Everything survives a reload from disk.
    let reloaded = load(&path);
    assert_eq!(reloaded.version_number(), 4);
    assert_eq!(
        component_names(&reloaded),
        vec![
            "dpx_widget",
            "dpx_lever_v4",
            "dpx_bracket_v4",
            "dpx_vertical_mount_v4"
        ]
    );
    assert_eq!(
        reloaded.document().root.bodies,
        vec!["dpx_base_v4", "std_screw"]
    );
    assert_eq!(reloaded.document().save_history.len(), 1);
}

#[test]
fn second_run_advances_to_the_next_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_document(dir.path());

    let mut host = load(&path);
    run_pass(&mut host, &PassOptions::default()).unwrap();

    let mut host = load(&path);
    let summary = run_pass(&mut host, &PassOptions::default()).unwrap();

    // Tags are replaced, never stacked.
    assert_eq!(summary.target_version, 5);
    let reloaded = load(&path);
    assert!(component_names(&reloaded).contains(&"dpx_lever_v5".to_string()));
    assert!(!component_names(&reloaded)
        .iter()
        .any(|name| name.contains("_v4_v5")));
}

#[test]
fn preview_touches_nothing_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_document(dir.path());
    let before = fs::read_to_string(&path).unwrap();

    let mut host = load(&path);
    let options = PassOptions {
        dry_run: true,
        ..PassOptions::default()
    };
    let summary = run_pass(&mut host, &options).unwrap();

    assert_eq!(summary.components_renamed, 3);
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn export_writes_a_versioned_copy() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_document(dir.path());

    let mut host = load(&path);
    let options = PassOptions {
        perform_export: true,
        ..PassOptions::default()
    };
    let summary = run_pass(&mut host, &options).unwrap();

    assert!(matches!(summary.export, Some(ExportStatus::Exported { .. })));
    assert!(dir.path().join("exports/dpx_widget_v4.json").exists());
}

#[test]
fn sibling_config_disables_body_renames() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_document(dir.path());
    fs::write(
        dir.path().join("tagsync.json"),
        r#"{"renameBodies": false}"#,
    )
    .unwrap();

    let config = PassConfig::load(None, &path).unwrap();
    let mut host = load(&path);
    let options = PassOptions {
        rename_bodies: config.rename_bodies,
        ..PassOptions::default()
    };
    let summary = run_pass(&mut host, &options).unwrap();

    assert_eq!(summary.bodies_renamed, 0);
    let reloaded = load(&path);
    assert_eq!(
        reloaded.document().root.bodies,
        vec!["dpx_base", "std_screw"]
    );
}

#[test]
fn never_saved_document_is_left_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dpx_fresh.json");
    fs::write(
        &path,
        r#"{"fileName": "dpx_fresh", "root": {"name": "dpx_fresh", "children": [{"name": "dpx_arm"}]}}"#,
    )
    .unwrap();
    let before = fs::read_to_string(&path).unwrap();

    let mut host = load(&path);
    let err = run_pass(&mut host, &PassOptions::default()).unwrap_err();

    assert_eq!(err.code, tagsync::ErrorCode::DocumentNeverSaved);
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
}
