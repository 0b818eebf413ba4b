//! Version tag parsing for entity names.
//!
//! An entity name may carry a version suffix (`dpx_lever_v3`); parsing
//! splits it into the semantic base name and the tagged version so a pass
//! can strip the old tag before applying the new one.

use regex::Regex;
use std::sync::LazyLock;

/// Anchored at both ends: the digits must run to the end of the name, so a
/// mid-string `_v` (e.g. `dpx_vertical_mount`) never counts as a tag.
static VERSION_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+)_v(\d+)$").expect("version tag pattern is valid"));

/// A parsed view of an entity name. Never persisted; computed on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTag {
    /// The name with any version suffix removed.
    pub base: String,
    /// The tagged version, when the name ends in `_v<digits>`.
    pub version: Option<u64>,
}

/// Parse an entity name into its base name and optional version tag.
///
/// Names without a trailing `_v<digits>` suffix come back unchanged as the
/// base with no version. Digit runs too large for `u64` are treated as part
/// of the name rather than a tag.
pub fn parse(name: &str) -> NameTag {
    if let Some(caps) = VERSION_TAG.captures(name) {
        if let Ok(version) = caps[2].parse::<u64>() {
            return NameTag {
                base: caps[1].to_string(),
                version: Some(version),
            };
        }
    }

    NameTag {
        base: name.to_string(),
        version: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_name() {
        let tag = parse("dpx_bracket_v2");
        assert_eq!(tag.base, "dpx_bracket");
        assert_eq!(tag.version, Some(2));
    }

    #[test]
    fn untagged_name_is_unchanged() {
        let tag = parse("dpx_lever");
        assert_eq!(tag.base, "dpx_lever");
        assert_eq!(tag.version, None);
    }

    #[test]
    fn mid_string_v_is_not_a_tag() {
        let tag = parse("dpx_vertical_mount");
        assert_eq!(tag.base, "dpx_vertical_mount");
        assert_eq!(tag.version, None);
    }

    #[test]
    fn trailing_non_digits_prevent_match() {
        let tag = parse("dpx_lever_v3a");
        assert_eq!(tag.base, "dpx_lever_v3a");
        assert_eq!(tag.version, None);

        let tag = parse("dpx_lever_v");
        assert_eq!(tag.base, "dpx_lever_v");
        assert_eq!(tag.version, None);
    }

    #[test]
    fn strips_exactly_one_suffix() {
        let tag = parse("dpx_lever_v3_v7");
        assert_eq!(tag.base, "dpx_lever_v3");
        assert_eq!(tag.version, Some(7));
    }

    #[test]
    fn base_must_be_non_empty() {
        let tag = parse("_v4");
        assert_eq!(tag.base, "_v4");
        assert_eq!(tag.version, None);
    }

    #[test]
    fn oversized_digit_run_is_not_a_tag() {
        let name = "dpx_lever_v99999999999999999999999999";
        let tag = parse(name);
        assert_eq!(tag.base, name);
        assert_eq!(tag.version, None);
    }

    #[test]
    fn parse_is_idempotent_on_base() {
        let first = parse("dpx_bracket_v2");
        let second = parse(&first.base);
        assert_eq!(second.base, first.base);
        assert_eq!(second.version, None);
    }
}
