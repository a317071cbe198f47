//! File extension allow-list.

use std::path::Path;

/// Source suffixes processed when no allow-list is configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".js", ".ts", ".tsx", ".vue", ".jsx", ".cjs", ".mjs"];

/// Case-sensitive set of eligible file extensions, stored with the leading dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSet {
    suffixes: Vec<String>,
}

impl Default for ExtensionSet {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS.iter().copied())
    }
}

impl ExtensionSet {
    /// Build a set; entries without a leading dot get one, blanks are dropped.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut suffixes: Vec<String> = Vec::new();
        for ext in extensions {
            let ext = ext.as_ref().trim();
            if ext.is_empty() || ext == "." {
                continue;
            }
            let ext = if ext.starts_with('.') {
                ext.to_string()
            } else {
                format!(".{ext}")
            };
            if !suffixes.contains(&ext) {
                suffixes.push(ext);
            }
        }
        Self { suffixes }
    }

    /// Extensions in configuration order.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.suffixes
    }

    /// Whether no extension is allowed at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }

    /// Whether `path` ends in an allowed extension.
    ///
    /// Follows the usual last-dot rule: `a.min.js` is `.js`, and a bare
    /// dotfile such as `.js` has no extension at all.
    #[must_use]
    pub fn is_eligible(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.suffixes
            .iter()
            .any(|suffix| suffix.strip_prefix('.') == Some(ext))
    }
}
