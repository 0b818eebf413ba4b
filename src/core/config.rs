//! Pass configuration, loaded from an optional `tagsync.json`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const CONFIG_FILE_NAME: &str = "tagsync.json";

fn default_rename_bodies() -> bool {
    true
}

fn default_export_dir() -> String {
    "exports".to_string()
}

fn default_message_tag() -> String {
    "[tagsync]".to_string()
}

/// Per-document pass settings. Every field has a default so an absent or
/// empty config file behaves identically to no config at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassConfig {
    /// Whether bodies are renamed alongside components. Kept as a toggle
    /// even though no known workflow turns it off.
    #[serde(default = "default_rename_bodies")]
    pub rename_bodies: bool,
    /// Export target directory, resolved relative to the document when not
    /// absolute.
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
    /// Tag prepended to generated commit messages.
    #[serde(default = "default_message_tag")]
    pub message_tag: String,
}

impl Default for PassConfig {
    fn default() -> Self {
        Self {
            rename_bodies: default_rename_bodies(),
            export_dir: default_export_dir(),
            message_tag: default_message_tag(),
        }
    }
}

impl PassConfig {
    /// Load configuration for a document.
    ///
    /// An explicit `--config` path must exist; otherwise `tagsync.json`
    /// next to the document is used when present, and defaults apply when
    /// it is not.
    pub fn load(explicit: Option<&Path>, document_path: &Path) -> Result<Self> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::config_invalid_value(
                        "config",
                        format!("Config file not found: {}", path.display()),
                    ));
                }
                path.to_path_buf()
            }
            None => {
                let sibling = document_path
                    .parent()
                    .unwrap_or_else(|| Path::new("."))
                    .join(CONFIG_FILE_NAME);
                if !sibling.exists() {
                    return Ok(Self::default());
                }
                sibling
            }
        };

        let content = fs::read_to_string(&path)
            .map_err(|err| Error::internal_io(err.to_string(), Some(path.display().to_string())))?;

        serde_json::from_str(&content)
            .map_err(|err| Error::config_invalid_json(path.display().to_string(), err))
    }

    /// The export directory as an absolute-or-document-relative path.
    pub fn resolved_export_dir(&self, document_path: &Path) -> PathBuf {
        let dir = Path::new(&self.export_dir);
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            document_path
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(dir)
        }
    }
}
