//! Unified diff rendering for dry-run previews.

use similar::TextDiff;

/// Render a unified diff of one file's strip, with `a/` and `b/` headers.
#[must_use]
pub fn render_unified_diff(label: &str, original: &str, modified: &str) -> String {
    let diff = TextDiff::from_lines(original, modified);
    diff.unified_diff()
        .context_radius(3)
        .header(&format!("a/{label}"), &format!("b/{label}"))
        .to_string()
}
