//! Notification port for traversal outcomes.
//!
//! The walker never returns errors to its caller; everything a host needs to
//! show goes through a [`Reporter`].

use std::sync::{Mutex, PoisonError};

/// Receives informational and error messages from a traversal.
///
/// Called concurrently from traversal tasks.
pub trait Reporter: Send + Sync {
    /// A file or directory pass completed.
    fn on_info(&self, message: &str);

    /// A file or directory failed; the rest of the traversal continues.
    fn on_error(&self, message: &str);
}

/// Forwards messages to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn on_info(&self, message: &str) {
        tracing::info!(event = "strip.report.info", "{message}");
    }

    fn on_error(&self, message: &str) {
        tracing::error!(event = "strip.report.error", "{message}");
    }
}

/// Keeps every message in memory, in arrival order.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    infos: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl MemoryReporter {
    /// Create an empty reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Informational messages received so far.
    #[must_use]
    pub fn infos(&self) -> Vec<String> {
        self.infos
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Error messages received so far.
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Reporter for MemoryReporter {
    fn on_info(&self, message: &str) {
        self.infos
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }

    fn on_error(&self, message: &str) {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.to_string());
    }
}
