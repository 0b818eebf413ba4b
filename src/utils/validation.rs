//! Input sanitization primitives.

/// Sanitize a user-supplied commit comment.
///
/// Keeps word characters, whitespace, and basic punctuation
/// (`- . , ! ? ( )`); everything else is stripped. Returns `None` when the
/// comment is empty after sanitization so callers can fall back to a
/// default message.
pub fn sanitize_comment(comment: &str) -> Option<String> {
    let sanitized: String = comment
        .trim()
        .chars()
        .filter(|c| {
            c.is_alphanumeric()
                || *c == '_'
                || c.is_whitespace()
                || matches!(c, '-' | '.' | ',' | '!' | '?' | '(' | ')')
        })
        .collect();

    let trimmed = sanitized.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
