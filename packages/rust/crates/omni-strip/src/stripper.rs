//! Call stripper - bounded recursive-descent scanner for debug calls.
//!
//! Recognizes `callee ( args ) ;?` where the argument body may contain plain
//! text, `'...'` / `"..."` / `` `...` `` literals with backslash escapes, and
//! parenthesized groups up to a fixed nesting depth. Anything the scanner
//! cannot close is left in place.

use crate::types::{MatchSpan, Removal, StripResult};

/// Callee removed when nothing else is configured.
pub const DEFAULT_CALLEE: &str = "console.log";

/// Parenthesized groups allowed inside the argument list by default.
///
/// `console.log(a(b))` is matched, `console.log(a(b(c)))` is not.
pub const DEFAULT_MAX_NESTING: usize = 1;

/// Upper bound on the nesting depth; the scanner recurses once per level.
pub const MAX_NESTING_LIMIT: usize = 64;

/// Removes debug call expressions from source text.
///
/// # Example
///
/// ```rust
/// use omni_strip::CallStripper;
///
/// let stripper = CallStripper::default();
/// let result = stripper.strip("a();\nconsole.log(\"x\", f(1));\nb();\n");
/// assert_eq!(result.modified, "a();\n\nb();\n");
/// assert_eq!(result.count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct CallStripper {
    callees: Vec<String>,
    max_nesting: usize,
}

impl Default for CallStripper {
    fn default() -> Self {
        Self::new([DEFAULT_CALLEE], DEFAULT_MAX_NESTING)
    }
}

impl CallStripper {
    /// Create a stripper for the given callee names and nesting depth.
    ///
    /// Empty callee names are ignored. `max_nesting` is capped at
    /// [`MAX_NESTING_LIMIT`].
    pub fn new<I, S>(callees: I, max_nesting: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let callees = callees
            .into_iter()
            .map(Into::<String>::into)
            .filter(|callee| !callee.is_empty())
            .collect();
        Self {
            callees,
            max_nesting: max_nesting.min(MAX_NESTING_LIMIT),
        }
    }

    /// Configured callee names, in match priority order.
    #[must_use]
    pub fn callees(&self) -> &[String] {
        &self.callees
    }

    /// Parenthesized nesting levels accepted inside arguments.
    #[must_use]
    pub fn max_nesting(&self) -> usize {
        self.max_nesting
    }

    /// Locate every call expression, left to right, without overlap.
    #[must_use]
    pub fn find_spans(&self, text: &str) -> Vec<MatchSpan> {
        let mut spans = Vec::new();
        let mut pos = 0;

        while let Some(start) = self.next_candidate(text, pos) {
            if let Some(end) = self.match_at(text, start) {
                spans.push(MatchSpan { start, end });
                pos = end;
            } else {
                pos = start + text[start..].chars().next().map_or(1, char::len_utf8);
            }
        }

        spans
    }

    /// Remove every call expression and record where each one was.
    #[must_use]
    pub fn strip(&self, text: &str) -> StripResult {
        let spans = self.find_spans(text);
        let mut modified = String::with_capacity(text.len());
        let mut removals = Vec::with_capacity(spans.len());

        let mut copied = 0;
        let mut counted = 0;
        let mut line = 1;
        let mut line_start = 0;
        for span in spans {
            modified.push_str(&text[copied..span.start]);

            // Lines are counted over the original text, removed calls included.
            for (offset, byte) in text[counted..span.start].bytes().enumerate() {
                if byte == b'\n' {
                    line += 1;
                    line_start = counted + offset + 1;
                }
            }
            counted = span.start;

            removals.push(Removal {
                span,
                line,
                column: span.start - line_start + 1,
                text: text[span.range()].to_string(),
            });
            copied = span.end;
        }
        modified.push_str(&text[copied..]);

        StripResult { modified, removals }
    }

    fn next_candidate(&self, text: &str, from: usize) -> Option<usize> {
        let rest = text.get(from..)?;
        self.callees
            .iter()
            .filter_map(|callee| rest.find(callee.as_str()))
            .min()
            .map(|offset| from + offset)
    }

    fn match_at(&self, text: &str, start: usize) -> Option<usize> {
        let rest = &text[start..];
        self.callees
            .iter()
            .filter(|callee| rest.starts_with(callee.as_str()))
            .find_map(|callee| self.match_call(text, start + callee.len()))
    }

    /// Match `\s* ( body ) ;?` starting right after the callee.
    fn match_call(&self, text: &str, after_callee: usize) -> Option<usize> {
        let open = skip_whitespace(text, after_callee);
        if text.as_bytes().get(open) != Some(&b'(') {
            return None;
        }
        let close = scan_group(text, open + 1, self.max_nesting)?;
        if text.as_bytes().get(close) == Some(&b';') {
            Some(close + 1)
        } else {
            Some(close)
        }
    }
}

/// Scan a group body up to and including its closing paren.
///
/// Returns the offset just past the `)`. A `(` with no nesting budget left,
/// an unterminated literal, or end of input fails the attempt.
fn scan_group(text: &str, mut pos: usize, depth_left: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    loop {
        match *bytes.get(pos)? {
            b')' => return Some(pos + 1),
            b'(' => {
                if depth_left == 0 {
                    return None;
                }
                pos = scan_group(text, pos + 1, depth_left - 1)?;
            }
            quote @ (b'"' | b'\'' | b'`') => pos = scan_literal(text, pos + 1, quote)?,
            _ => pos += 1,
        }
    }
}

/// Scan a quoted literal body; returns the offset just past the closing quote.
fn scan_literal(text: &str, mut pos: usize, quote: u8) -> Option<usize> {
    let bytes = text.as_bytes();
    loop {
        match *bytes.get(pos)? {
            b if b == quote => return Some(pos + 1),
            b'\\' => {
                let escaped = text[pos + 1..].chars().next()?;
                if is_line_terminator(escaped) {
                    return None;
                }
                pos += 1 + escaped.len_utf8();
            }
            _ => pos += 1,
        }
    }
}

fn skip_whitespace(text: &str, from: usize) -> usize {
    text[from..]
        .char_indices()
        .find(|(_, c)| !is_js_whitespace(*c))
        .map_or(text.len(), |(offset, _)| from + offset)
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// ECMAScript `\s`: WhiteSpace plus LineTerminator.
fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}
