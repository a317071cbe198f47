//! Core types for the strip pipeline.

use std::ops::Range;

use serde::Serialize;

/// Half-open byte range `[start, end)` covering one debug call expression,
/// including the trailing `;` when it directly follows the closing paren.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchSpan {
    /// Byte offset of the first callee character.
    pub start: usize,
    /// Byte offset one past the `)` or `;`.
    pub end: usize,
}

impl MatchSpan {
    /// Span length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no bytes (never true for scanner output).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The span as a slice range.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// One removed call, with its position in the original text.
#[derive(Debug, Clone, Serialize)]
pub struct Removal {
    /// Byte range in the original text.
    pub span: MatchSpan,
    /// Line number (1-indexed).
    pub line: usize,
    /// Byte column (1-indexed).
    pub column: usize,
    /// Removed text.
    pub text: String,
}

/// Output of stripping one text buffer.
#[derive(Debug, Clone, Serialize)]
pub struct StripResult {
    /// Text with every matched span removed.
    pub modified: String,
    /// Removed calls in source order.
    pub removals: Vec<Removal>,
}

impl StripResult {
    /// Number of removed calls.
    #[must_use]
    pub fn count(&self) -> usize {
        self.removals.len()
    }

    /// True when nothing matched and `modified` equals the input.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.removals.is_empty()
    }
}

/// Counters for one `process_path` invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StripSummary {
    /// Eligible files that were read.
    pub files_scanned: usize,
    /// Files with at least one removal (written unless dry run).
    pub files_changed: usize,
    /// Total removed calls.
    pub removals: usize,
    /// Failures reported through the error channel.
    pub failures: usize,
}
