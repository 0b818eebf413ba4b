//! Host abstraction over the design document's object graph.
//!
//! The component/body tree is owned by the hosting application; the core
//! pass only reads names, writes names, and asks for a save. Putting that
//! surface behind a trait lets the pass run against a fake tree in tests
//! and against the JSON-backed document in the CLI.

use crate::error::Result;

/// Handle to a component in the host's tree. Stable for the life of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComponentId(pub usize);

/// Handle to a body, owned by exactly one component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId {
    pub component: ComponentId,
    pub index: usize,
}

/// Result of asking the host to rename an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    Applied,
    /// The host refused (name collision, invalid characters, protected
    /// entity). Carries the host's reason.
    Rejected(String),
}

/// The document surface the versioning pass needs from its host.
pub trait DesignHost {
    fn file_name(&self) -> &str;

    /// The host-assigned save version. Meaningless when `never_saved`.
    fn version_number(&self) -> u64;

    fn never_saved(&self) -> bool;

    /// Every component in the document, root included, in any order.
    fn component_ids(&self) -> Vec<ComponentId>;

    fn component_name(&self, id: ComponentId) -> String;

    fn is_root_component(&self, id: ComponentId) -> bool;

    /// Bodies owned directly by the given component.
    fn body_ids(&self, component: ComponentId) -> Vec<BodyId>;

    fn body_name(&self, id: BodyId) -> String;

    fn rename_component(&mut self, id: ComponentId, new_name: &str) -> RenameOutcome;

    fn rename_body(&mut self, id: BodyId, new_name: &str) -> RenameOutcome;

    /// Persist the document with a commit message, returning the new
    /// version number.
    fn save(&mut self, commit_message: &str) -> Result<u64>;

    /// Run the host's export step, returning a description of the export
    /// target.
    fn export(&mut self) -> Result<String>;
}
