//! JSON-backed design document, the CLI's `DesignHost` implementation.
//!
//! The document lives in a single JSON file: a filename, the host-assigned
//! save version (0 = never saved), a component tree rooted at exactly one
//! root component, and a save history. Rename constraints the real host
//! would enforce (protected root, name collisions, control characters) are
//! enforced here so rejection handling has a live code path.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::host::{BodyId, ComponentId, DesignHost, RenameOutcome};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentNode {
    pub name: String,
    #[serde(default)]
    pub bodies: Vec<String>,
    #[serde(default)]
    pub children: Vec<ComponentNode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRecord {
    pub version: u64,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFile {
    pub file_name: String,
    /// Host-assigned save version; 0 means the document was never saved.
    #[serde(default)]
    pub version: u64,
    pub root: ComponentNode,
    #[serde(default)]
    pub save_history: Vec<SaveRecord>,
}

/// A design document loaded from disk.
///
/// Component handles index a flattened view of the tree (depth-first, root
/// first) built at load time; the tree itself is only restructured by the
/// modeling host, never by a pass, so the view stays valid for the
/// document's lifetime.
#[derive(Debug)]
pub struct JsonDocument {
    path: PathBuf,
    export_dir: PathBuf,
    doc: DocumentFile,
    // Child-index path from the root for each component; empty = root.
    component_paths: Vec<Vec<usize>>,
}

impl JsonDocument {
    pub fn load(path: &Path, export_dir: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => Error::document_not_found(path.display().to_string()),
            _ => Error::internal_io(err.to_string(), Some(path.display().to_string())),
        })?;

        let doc: DocumentFile = serde_json::from_str(&content)
            .map_err(|err| Error::document_invalid_json(path.display().to_string(), err))?;

        let mut component_paths = Vec::new();
        flatten(&doc.root, &mut Vec::new(), &mut component_paths);

        Ok(Self {
            path: path.to_path_buf(),
            export_dir: export_dir.to_path_buf(),
            doc,
            component_paths,
        })
    }

    pub fn document(&self) -> &DocumentFile {
        &self.doc
    }

    fn node(&self, id: ComponentId) -> &ComponentNode {
        let mut node = &self.doc.root;
        for &child in &self.component_paths[id.0] {
            node = &node.children[child];
        }
        node
    }

    fn node_mut(&mut self, id: ComponentId) -> &mut ComponentNode {
        let path = self.component_paths[id.0].clone();
        let mut node = &mut self.doc.root;
        for child in path {
            node = &mut node.children[child];
        }
        node
    }

    fn write_to(&self, path: &Path) -> std::io::Result<()> {
        let payload = serde_json::to_string_pretty(&self.doc)
            .map_err(|err| std::io::Error::other(err.to_string()))?;
        fs::write(path, payload + "\n")
    }

    /// The collision rule the host applies to component names: unique
    /// across the whole document.
    fn component_name_taken(&self, id: ComponentId, name: &str) -> bool {
        self.component_ids()
            .into_iter()
            .any(|other| other != id && self.node(other).name == name)
    }
}

fn flatten(node: &ComponentNode, path: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
    out.push(path.clone());
    for (index, child) in node.children.iter().enumerate() {
        path.push(index);
        flatten(child, path, out);
        path.pop();
    }
}

fn invalid_name_reason(name: &str) -> Option<String> {
    if name.is_empty() {
        return Some("name cannot be empty".to_string());
    }
    if name.chars().any(|c| c.is_control()) {
        return Some("name contains control characters".to_string());
    }
    None
}

impl DesignHost for JsonDocument {
    fn file_name(&self) -> &str {
        &self.doc.file_name
    }

    fn version_number(&self) -> u64 {
        self.doc.version
    }

    fn never_saved(&self) -> bool {
        self.doc.version == 0
    }

    fn component_ids(&self) -> Vec<ComponentId> {
        (0..self.component_paths.len()).map(ComponentId).collect()
    }

    fn component_name(&self, id: ComponentId) -> String {
        self.node(id).name.clone()
    }

    fn is_root_component(&self, id: ComponentId) -> bool {
        self.component_paths[id.0].is_empty()
    }

    fn body_ids(&self, component: ComponentId) -> Vec<BodyId> {
        (0..self.node(component).bodies.len())
            .map(|index| BodyId { component, index })
            .collect()
    }

    fn body_name(&self, id: BodyId) -> String {
        self.node(id.component).bodies[id.index].clone()
    }

    fn rename_component(&mut self, id: ComponentId, new_name: &str) -> RenameOutcome {
        if self.is_root_component(id) {
            return RenameOutcome::Rejected("root component is protected".to_string());
        }
        if let Some(reason) = invalid_name_reason(new_name) {
            return RenameOutcome::Rejected(reason);
        }
        if self.component_name_taken(id, new_name) {
            return RenameOutcome::Rejected(format!(
                "a component named '{}' already exists",
                new_name
            ));
        }

        self.node_mut(id).name = new_name.to_string();
        RenameOutcome::Applied
    }

    fn rename_body(&mut self, id: BodyId, new_name: &str) -> RenameOutcome {
        if let Some(reason) = invalid_name_reason(new_name) {
            return RenameOutcome::Rejected(reason);
        }

        let bodies = &self.node(id.component).bodies;
        let collision = bodies
            .iter()
            .enumerate()
            .any(|(index, body)| index != id.index && body == new_name);
        if collision {
            return RenameOutcome::Rejected(format!(
                "a body named '{}' already exists in this component",
                new_name
            ));
        }

        self.node_mut(id.component).bodies[id.index] = new_name.to_string();
        RenameOutcome::Applied
    }

    fn save(&mut self, commit_message: &str) -> Result<u64> {
        self.doc.version += 1;
        self.doc.save_history.push(SaveRecord {
            version: self.doc.version,
            message: commit_message.to_string(),
        });

        let path = self.path.clone();
        if let Err(err) = self.write_to(&path) {
            // Roll the in-memory counter back so a retry does not double
            // advance the version.
            self.doc.version -= 1;
            self.doc.save_history.pop();
            return Err(Error::save_failed(&self.doc.file_name, err.to_string()));
        }

        Ok(self.doc.version)
    }

    fn export(&mut self) -> Result<String> {
        fs::create_dir_all(&self.export_dir)
            .map_err(|err| Error::export_failed(err.to_string()))?;

        let target = self
            .export_dir
            .join(format!("{}_v{}.json", self.doc.file_name, self.doc.version));
        self.write_to(&target)
            .map_err(|err| Error::export_failed(err.to_string()))?;

        Ok(target.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "fileName": "dpx_widget",
            "version": 3,
            "root": {
                "name": "dpx_widget",
                "bodies": ["dpx_base", "std_screw"],
                "children": [
                    {"name": "dpx_lever"},
                    {"name": "dpx_arm", "children": [{"name": "dpx_arm_inner"}]}
                ]
            }
        }"#
    }

    fn load_sample(dir: &Path) -> JsonDocument {
        let path = dir.join("dpx_widget.json");
        fs::write(&path, sample_json()).unwrap();
        JsonDocument::load(&path, &dir.join("exports")).unwrap()
    }

    #[test]
    fn flattens_nested_components_root_first() {
        let dir = tempfile::tempdir().unwrap();
        let doc = load_sample(dir.path());

        let names: Vec<String> = doc
            .component_ids()
            .into_iter()
            .map(|id| doc.component_name(id))
            .collect();
        assert_eq!(
            names,
            vec!["dpx_widget", "dpx_lever", "dpx_arm", "dpx_arm_inner"]
        );
        assert!(doc.is_root_component(ComponentId(0)));
        assert!(!doc.is_root_component(ComponentId(3)));
    }

    #[test]
    fn missing_file_maps_to_document_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err =
            JsonDocument::load(&dir.path().join("absent.json"), dir.path()).unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::DocumentNotFound);
    }

    #[test]
    fn malformed_json_maps_to_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{not json").unwrap();
        let err = JsonDocument::load(&path, dir.path()).unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::DocumentInvalidJson);
    }

    #[test]
    fn root_rename_is_rejected_by_the_host() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = load_sample(dir.path());
        let outcome = doc.rename_component(ComponentId(0), "other");
        assert!(matches!(outcome, RenameOutcome::Rejected(_)));
        assert_eq!(doc.component_name(ComponentId(0)), "dpx_widget");
    }

    #[test]
    fn component_name_collision_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = load_sample(dir.path());
        let outcome = doc.rename_component(ComponentId(1), "dpx_arm");
        assert_eq!(
            outcome,
            RenameOutcome::Rejected("a component named 'dpx_arm' already exists".to_string())
        );
    }

    #[test]
    fn body_collision_is_scoped_to_its_component() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = load_sample(dir.path());
        let body = BodyId {
            component: ComponentId(0),
            index: 0,
        };
        assert!(matches!(
            doc.rename_body(body, "std_screw"),
            RenameOutcome::Rejected(_)
        ));
        assert_eq!(doc.rename_body(body, "dpx_base_v4"), RenameOutcome::Applied);
    }

    #[test]
    fn control_characters_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = load_sample(dir.path());
        assert!(matches!(
            doc.rename_component(ComponentId(1), "dpx\nlever"),
            RenameOutcome::Rejected(_)
        ));
    }

    #[test]
    fn save_increments_version_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = load_sample(dir.path());
        let version = doc.save("[tagsync] test save").unwrap();
        assert_eq!(version, 4);

        let reloaded =
            JsonDocument::load(&dir.path().join("dpx_widget.json"), dir.path()).unwrap();
        assert_eq!(reloaded.version_number(), 4);
        assert_eq!(reloaded.document().save_history.len(), 1);
        assert_eq!(
            reloaded.document().save_history[0].message,
            "[tagsync] test save"
        );
    }

    #[test]
    fn export_writes_versioned_copy() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = load_sample(dir.path());
        doc.save("[tagsync] test save").unwrap();
        let target = doc.export().unwrap();

        assert!(target.ends_with("dpx_widget_v4.json"));
        assert!(dir.path().join("exports/dpx_widget_v4.json").exists());
    }

    #[test]
    fn zero_version_means_never_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.json");
        fs::write(
            &path,
            r#"{"fileName": "dpx_fresh", "root": {"name": "dpx_fresh"}}"#,
        )
        .unwrap();
        let doc = JsonDocument::load(&path, dir.path()).unwrap();
        assert!(doc.never_saved());
    }
}
