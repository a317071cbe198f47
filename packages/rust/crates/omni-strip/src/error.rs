//! Error types for the strip pipeline.
//!
//! Library code returns explicit `thiserror` enums; only the binary uses `anyhow`.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading or writing a single source file.
#[derive(Error, Debug)]
pub enum IoError {
    /// File does not exist (or metadata could not be read).
    #[error("File not found: {0}")]
    NotFound(String),

    /// File exceeds the configured size limit.
    #[error("File too large: {0} bytes (limit: {1})")]
    TooLarge(u64, u64),

    /// File contains binary content (NULL bytes detected).
    #[error("Binary file detected")]
    BinaryFile,

    /// Content is not valid UTF-8.
    #[error("Not valid UTF-8 text")]
    Encoding,

    /// Low-level I/O error from std::io.
    #[error("IO error: {0}")]
    System(#[from] std::io::Error),
}

/// A non-fatal failure recorded during a traversal.
///
/// None of these abort a run; the walker hands each one to the
/// [`Reporter`](crate::Reporter) error channel and carries on with siblings.
#[derive(Error, Debug)]
pub enum StripError {
    /// Source file could not be read; it is left untouched.
    #[error("Failed to clean file {}: {source}", .path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: IoError,
    },

    /// Stripped content could not be written back.
    #[error("Failed to write file {}: {source}", .path.display())]
    Write {
        /// File that failed.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: IoError,
    },

    /// Directory could not be listed; its subtree is skipped.
    #[error("Failed to clean directory {}: {source}", .path.display())]
    List {
        /// Directory that failed.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: std::io::Error,
    },

    /// File type or metadata lookup failed.
    #[error("Failed to inspect {}: {source}", .path.display())]
    Inspect {
        /// Path that failed.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: std::io::Error,
    },

    /// A spawned traversal task panicked or was cancelled.
    #[error("Traversal task failed: {0}")]
    Task(String),
}

/// Failures loading an explicitly requested settings file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Settings file could not be read.
    #[error("Failed to read settings {}: {source}", .path.display())]
    Read {
        /// Settings file.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: std::io::Error,
    },

    /// Settings file is not valid YAML for the expected schema.
    #[error("Failed to parse settings {}: {source}", .path.display())]
    Parse {
        /// Settings file.
        path: PathBuf,
        /// Underlying cause.
        #[source]
        source: serde_yaml::Error,
    },

    /// Settings parsed but describe an unusable configuration.
    #[error("Invalid settings: {0}")]
    Invalid(String),
}
