//! omni-strip CLI: strip debug calls from a file or directory tree.
//!
//! Settings come from `~/.config/omni-strip/settings.yaml`, `./.omni-strip.yaml`
//! and `--conf <file>`, with flags on top.
//!
//! Logging: set `RUST_LOG=omni_strip=debug` to see per-file logs on stderr.

mod cli;

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use omni_strip::{Reporter, TreeWalker, load_settings};

use crate::cli::Cli;

/// Prints info and errors, counting errors for the exit code.
///
/// Info goes to stdout unless stdout is reserved for the `--json` summary.
struct ConsoleReporter {
    errors: AtomicUsize,
    info_to_stderr: bool,
}

impl ConsoleReporter {
    fn new(json: bool) -> Self {
        Self {
            errors: AtomicUsize::new(0),
            info_to_stderr: json,
        }
    }

    fn write_info(&self, out: &mut impl Write, err: &mut impl Write, message: &str) {
        let sink: &mut dyn Write = if self.info_to_stderr { err } else { out };
        let _ = writeln!(sink, "{message}");
    }
}

impl Reporter for ConsoleReporter {
    fn on_info(&self, message: &str) {
        self.write_info(&mut std::io::stdout(), &mut std::io::stderr(), message);
    }

    fn on_error(&self, message: &str) {
        self.errors.fetch_add(1, Ordering::Relaxed);
        eprintln!("error: {message}");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "omni_strip=debug"
        } else {
            "omni_strip=info"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let config = load_settings(cli.conf.as_deref())?
        .merge(cli.settings_overlay())
        .resolve()
        .context("invalid omni-strip configuration")?;
    tracing::debug!(?config, "resolved configuration");

    let path = match cli.path.clone() {
        Some(path) => path,
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };

    let reporter = Arc::new(ConsoleReporter::new(cli.json));
    let walker = TreeWalker::new(&config, reporter.clone());
    let summary = walker.process_path(&path).await;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    let failures = reporter.errors.load(Ordering::Relaxed);
    if failures > 0 {
        bail!("{failures} path(s) could not be cleaned");
    }
    Ok(())
}
