// Public modules
pub mod config;
pub mod document;
pub mod error;
pub mod host;
pub mod name_tag;
pub mod pass;
pub mod planner;
pub mod prefix;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use host::{BodyId, ComponentId, DesignHost, RenameOutcome};
pub use pass::{PassOptions, PassSummary};
