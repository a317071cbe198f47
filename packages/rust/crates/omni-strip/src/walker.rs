//! Tree walker - concurrent directory traversal with per-file isolation.
//!
//! Every entry of a directory is spawned onto a [`JoinSet`]; the directory
//! finishes only after all of its tasks (and their subtrees) have finished.
//! Failures are handed to the [`Reporter`] and never abort the traversal.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::task::JoinSet;

use crate::config::StripConfig;
use crate::diff::render_unified_diff;
use crate::error::StripError;
use crate::extensions::ExtensionSet;
use crate::io::{read_source, write_source};
use crate::report::Reporter;
use crate::stripper::CallStripper;
use crate::types::StripSummary;

type WalkFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Applies a [`CallStripper`] to every eligible file under a path.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use omni_strip::{StripConfig, TracingReporter, TreeWalker};
///
/// let walker = TreeWalker::new(&StripConfig::default(), Arc::new(TracingReporter));
/// let summary = walker.process_path("./src").await;
/// println!("removed {} calls", summary.removals);
/// ```
#[derive(Clone)]
pub struct TreeWalker {
    stripper: CallStripper,
    extensions: ExtensionSet,
    skip_dirs: Vec<String>,
    max_file_size: u64,
    dry_run: bool,
    atomic_write: bool,
    reporter: Arc<dyn Reporter>,
}

impl TreeWalker {
    /// Build a walker from a resolved configuration.
    pub fn new(config: &StripConfig, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            stripper: CallStripper::new(config.callees.iter().cloned(), config.max_nesting_depth),
            extensions: ExtensionSet::new(&config.extensions),
            skip_dirs: config.skip_dirs.clone(),
            max_file_size: config.max_file_size,
            dry_run: config.dry_run,
            atomic_write: config.atomic_write,
            reporter,
        }
    }

    /// The stripper applied to each file.
    #[must_use]
    pub fn stripper(&self) -> &CallStripper {
        &self.stripper
    }

    /// Strip a single file or a whole directory tree.
    ///
    /// Never fails: every problem is reported through `on_error`, and one
    /// `on_info` message marks completion of the root path.
    pub async fn process_path(&self, path: impl AsRef<Path>) -> StripSummary {
        let path = absolute(path.as_ref());
        let run = Arc::new(Traversal {
            walker: self.clone(),
            stats: Counters::default(),
        });

        match tokio::fs::metadata(&path).await {
            Err(source) => run.fail(StripError::Inspect {
                path: path.clone(),
                source,
            }),
            Ok(meta) if meta.is_dir() => {
                walk_dir(Arc::clone(&run), path.clone()).await;
                let summary = run.stats.snapshot();
                self.reporter.on_info(&format!(
                    "{} {} call(s) in {} of {} file(s) in directory: {}{}",
                    self.verb(),
                    summary.removals,
                    summary.files_changed,
                    summary.files_scanned,
                    path.display(),
                    failure_suffix(summary.failures),
                ));
            }
            Ok(meta) if meta.is_file() => {
                if self.extensions.is_eligible(&path) {
                    if let Some(removed) = run.process_file(&path).await {
                        self.reporter.on_info(&format!(
                            "{} {removed} call(s) in file: {}",
                            self.verb(),
                            path.display()
                        ));
                    }
                } else {
                    self.reporter.on_info(&format!(
                        "Skipped file with unsupported extension: {}",
                        path.display()
                    ));
                }
            }
            Ok(_) => self.reporter.on_info(&format!(
                "Skipped path that is neither a file nor a directory: {}",
                path.display()
            )),
        }

        run.stats.snapshot()
    }

    fn verb(&self) -> &'static str {
        if self.dry_run { "Would remove" } else { "Removed" }
    }
}

/// State shared by every task of one `process_path` call.
struct Traversal {
    walker: TreeWalker,
    stats: Counters,
}

#[derive(Default)]
struct Counters {
    files_scanned: AtomicUsize,
    files_changed: AtomicUsize,
    removals: AtomicUsize,
    failures: AtomicUsize,
}

impl Counters {
    fn snapshot(&self) -> StripSummary {
        StripSummary {
            files_scanned: self.files_scanned.load(Ordering::Relaxed),
            files_changed: self.files_changed.load(Ordering::Relaxed),
            removals: self.removals.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

impl Traversal {
    fn fail(&self, error: StripError) {
        self.stats.failures.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(event = "strip.failure", error = ?error, "traversal failure");
        self.walker.reporter.on_error(&error.to_string());
    }

    /// Read, strip and write one file. Returns the removal count on success.
    async fn process_file(&self, path: &Path) -> Option<usize> {
        match self.rewrite_file(path).await {
            Ok(removed) => Some(removed),
            Err(error) => {
                self.fail(error);
                None
            }
        }
    }

    async fn rewrite_file(&self, path: &Path) -> Result<usize, StripError> {
        let walker = &self.walker;
        self.stats.files_scanned.fetch_add(1, Ordering::Relaxed);

        let content = read_source(path, walker.max_file_size)
            .await
            .map_err(|source| StripError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let result = walker.stripper.strip(&content);
        if result.is_unchanged() {
            return Ok(0);
        }
        let removed = result.count();

        if walker.dry_run {
            let label = path.display().to_string();
            walker
                .reporter
                .on_info(&render_unified_diff(&label, &content, &result.modified));
        } else {
            write_source(path, &result.modified, walker.atomic_write)
                .await
                .map_err(|source| StripError::Write {
                    path: path.to_path_buf(),
                    source,
                })?;
        }

        self.stats.files_changed.fetch_add(1, Ordering::Relaxed);
        self.stats.removals.fetch_add(removed, Ordering::Relaxed);
        tracing::debug!(
            event = "strip.file.rewritten",
            path = %path.display(),
            removed,
            dry_run = walker.dry_run,
            "stripped file"
        );
        Ok(removed)
    }

    fn skips_dir(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.walker.skip_dirs.iter().any(|skip| skip == name))
    }
}

/// List `dir`, spawn one task per eligible entry, then wait for all of them.
fn walk_dir(run: Arc<Traversal>, dir: PathBuf) -> WalkFuture {
    Box::pin(async move {
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(source) => {
                run.fail(StripError::List { path: dir, source });
                return;
            }
        };

        let mut tasks = JoinSet::new();
        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(source) => {
                    run.fail(StripError::List {
                        path: dir.clone(),
                        source,
                    });
                    break;
                }
            };
            let path = entry.path();

            // `DirEntry::file_type` does not follow symlinks, so links are skipped.
            let file_type = match entry.file_type().await {
                Ok(file_type) => file_type,
                Err(source) => {
                    run.fail(StripError::Inspect { path, source });
                    continue;
                }
            };

            if file_type.is_dir() {
                if run.skips_dir(&path) {
                    tracing::debug!(
                        event = "strip.dir.skipped",
                        path = %path.display(),
                        "skipped directory"
                    );
                    continue;
                }
                tasks.spawn(walk_dir(Arc::clone(&run), path));
            } else if file_type.is_file() && run.walker.extensions.is_eligible(&path) {
                let run = Arc::clone(&run);
                tasks.spawn(async move {
                    run.process_file(&path).await;
                });
            }
        }

        // Release the directory handle before waiting on the subtree.
        drop(entries);

        while let Some(joined) = tasks.join_next().await {
            if let Err(join_error) = joined {
                run.fail(StripError::Task(join_error.to_string()));
            }
        }
        tracing::debug!(
            event = "strip.dir.completed",
            path = %dir.display(),
            "directory done"
        );
    })
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

fn failure_suffix(failures: usize) -> String {
    if failures == 0 {
        String::new()
    } else {
        format!(" ({failures} failure(s))")
    }
}
