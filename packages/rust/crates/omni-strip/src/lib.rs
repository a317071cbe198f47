#![allow(clippy::doc_markdown)]

//! omni-strip - Debug-call removal for JavaScript/TypeScript source trees
//!
//! Finds `console.log(...)` style call expressions and deletes them, either in
//! one file or across a directory tree, without touching surrounding code.
//!
//! # Features
//!
//! - **Bounded scanner**: strings, template literals, escapes and one level of
//!   nested parentheses (configurable) without a full parser
//! - **Concurrent traversal**: one tokio task per directory entry, joined per directory
//! - **Failure isolation**: unreadable files or directories are reported, siblings continue
//! - **Safe writes**: temp file + rename, binary and non-UTF-8 files refused
//! - **Dry run**: unified diff previews instead of writes
//!
//! # Architecture
//!
//! ```text
//! omni-strip/src/
//! ├── lib.rs        # Re-exports (this file)
//! ├── error.rs      # StripError, IoError, ConfigError (thiserror)
//! ├── types.rs      # MatchSpan, Removal, StripResult, StripSummary
//! ├── stripper.rs   # CallStripper scanner
//! ├── extensions.rs # ExtensionSet allow-list
//! ├── io.rs         # Safe read / atomic write (tokio::fs)
//! ├── diff.rs       # Dry-run diffs
//! ├── report.rs     # Reporter notification port
//! ├── walker.rs     # TreeWalker fan-out/fan-in traversal
//! ├── config.rs     # StripConfig + YAML settings layers
//! ├── cli.rs        # clap arguments (binary only)
//! └── main.rs       # omni-strip binary
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use omni_strip::{CallStripper, MemoryReporter, StripConfig, TreeWalker};
//!
//! // Pure text transform
//! let cleaned = CallStripper::default().strip("a();console.log(1);b();").modified;
//! assert_eq!(cleaned, "a();b();");
//!
//! // Whole tree
//! let reporter = Arc::new(MemoryReporter::new());
//! let walker = TreeWalker::new(&StripConfig::default(), reporter.clone());
//! let summary = walker.process_path("/project/src").await;
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod config;
pub mod diff;
mod error;
mod extensions;
pub mod io;
mod report;
mod stripper;
mod types;
mod walker;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use config::{StripConfig, StripSettings, load_settings};
pub use error::{ConfigError, IoError, StripError};
pub use extensions::{DEFAULT_EXTENSIONS, ExtensionSet};
pub use report::{MemoryReporter, Reporter, TracingReporter};
pub use stripper::{CallStripper, DEFAULT_CALLEE, DEFAULT_MAX_NESTING, MAX_NESTING_LIMIT};
pub use types::{MatchSpan, Removal, StripResult, StripSummary};
pub use walker::TreeWalker;
