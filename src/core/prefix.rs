//! Filename prefix extraction for entity membership testing.
//!
//! A document named `dpx_widget` owns entities whose names start with
//! `dpx_`; the prefix is always the filename's first three characters plus
//! the separator detected immediately after them.

use crate::error::{Error, Result};

const SEPARATORS: [char; 2] = ['_', '-'];

/// Extract the matching prefix from a document filename.
///
/// Takes the first three characters verbatim (case-sensitive) and appends
/// the separator (`_` or `-`) that immediately follows them in the filename;
/// when neither follows, `_` is used. A filename with fewer than three
/// characters before any separator cannot produce a prefix and is rejected.
pub fn extract(file_name: &str) -> Result<String> {
    let mut chars = file_name.chars();
    let head: Vec<char> = chars.by_ref().take(3).collect();

    if head.len() < 3 {
        return Err(Error::filename_prefix_invalid(
            file_name,
            format!(
                "Need at least 3 characters, found {}",
                head.len()
            ),
        ));
    }

    if head.iter().any(|c| SEPARATORS.contains(c)) {
        return Err(Error::filename_prefix_invalid(
            file_name,
            "Separator appears within the first 3 characters",
        ));
    }

    let separator = match chars.next() {
        Some(c) if SEPARATORS.contains(&c) => c,
        _ => '_',
    };

    let mut prefix: String = head.into_iter().collect();
    prefix.push(separator);
    Ok(prefix)
}
