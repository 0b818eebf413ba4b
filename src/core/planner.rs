//! Per-entity rename planning.
//!
//! Combines the membership test and base-name extraction into a single
//! decision: rename an entity to carry the target version tag, or skip it.
//! Planning is pure; applying the rename is the traversal driver's job.

use crate::name_tag;

/// The decision for one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// Rename the entity to the contained name.
    Rename(String),
    Skip(SkipReason),
}

/// Why an entity was left alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The document's root component is never renamed.
    RootComponent,
    /// The base name does not start with the document's prefix.
    PrefixMismatch,
    /// The name already carries the target version tag.
    AlreadyCurrent,
    /// The host rejected the rename (recorded by the traversal driver).
    Rejected(String),
}

impl SkipReason {
    pub fn describe(&self) -> String {
        match self {
            SkipReason::RootComponent => "root component".to_string(),
            SkipReason::PrefixMismatch => "prefix mismatch".to_string(),
            SkipReason::AlreadyCurrent => "already current".to_string(),
            SkipReason::Rejected(reason) => format!("rejected by host: {}", reason),
        }
    }
}

/// Compute the plan for one entity.
///
/// The root component is structurally excluded before anything else. For all
/// other entities the name is stripped of any existing version suffix; if
/// the base starts with the document prefix the target name is
/// `{base}_v{target_version}`. The reconstructed separator is always `_`,
/// even when the prefix was detected with a dash — dash-prefixed files still
/// get underscore version suffixes (deliberate normalization).
pub fn plan(name: &str, is_root: bool, prefix: &str, target_version: u64) -> Plan {
    if is_root {
        return Plan::Skip(SkipReason::RootComponent);
    }

    let tag = name_tag::parse(name);
    if !tag.base.starts_with(prefix) {
        return Plan::Skip(SkipReason::PrefixMismatch);
    }

    let new_name = format!("{}_v{}", tag.base, target_version);
    if new_name == name {
        return Plan::Skip(SkipReason::AlreadyCurrent);
    }

    Plan::Rename(new_name)
}
