use std::path::PathBuf;

use clap::Parser;

use omni_strip::StripSettings;

#[derive(Parser, Debug)]
#[command(name = "omni-strip")]
#[command(
    version,
    about = "Remove console.log style debug calls from a file or directory tree."
)]
pub(crate) struct Cli {
    /// File or directory to clean (default: current directory)
    pub(crate) path: Option<PathBuf>,

    /// Show a diff of what would be removed without writing files
    #[arg(long)]
    pub(crate) dry_run: bool,

    /// Callee to remove; repeat for several (default: console.log)
    #[arg(long = "callee", value_name = "NAME")]
    pub(crate) callees: Vec<String>,

    /// Eligible file extension; repeat for several (default: .js .ts .tsx .vue .jsx .cjs .mjs)
    #[arg(long = "ext", value_name = "EXT")]
    pub(crate) extensions: Vec<String>,

    /// Nested parenthesis levels accepted inside call arguments
    #[arg(long, value_name = "N")]
    pub(crate) max_depth: Option<usize>,

    /// Directory name to skip; repeat for several
    #[arg(long = "skip-dir", value_name = "NAME")]
    pub(crate) skip_dirs: Vec<String>,

    /// Overwrite files in place instead of temp file + rename
    #[arg(long)]
    pub(crate) no_atomic: bool,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    pub(crate) json: bool,

    /// Settings file layered over user and project settings
    #[arg(long, value_name = "FILE")]
    pub(crate) conf: Option<PathBuf>,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl Cli {
    /// Command-line flags as the top settings layer.
    pub(crate) fn settings_overlay(&self) -> StripSettings {
        StripSettings {
            callees: non_empty(&self.callees),
            extensions: non_empty(&self.extensions),
            max_nesting_depth: self.max_depth,
            max_file_size: None,
            dry_run: self.dry_run.then_some(true),
            atomic_write: self.no_atomic.then_some(false),
            skip_dirs: non_empty(&self.skip_dirs),
        }
    }
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    (!values.is_empty()).then(|| values.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_become_overlay() {
        let cli = Cli::parse_from([
            "omni-strip",
            "src",
            "--dry-run",
            "--callee",
            "console.debug",
            "--ext",
            "js",
            "--no-atomic",
        ]);
        let overlay = cli.settings_overlay();
        assert_eq!(cli.path, Some(PathBuf::from("src")));
        assert_eq!(overlay.callees, Some(vec!["console.debug".to_string()]));
        assert_eq!(overlay.extensions, Some(vec!["js".to_string()]));
        assert_eq!(overlay.dry_run, Some(true));
        assert_eq!(overlay.atomic_write, Some(false));
        assert_eq!(overlay.skip_dirs, None);
    }

    #[test]
    fn test_no_flags_leave_settings_untouched() {
        let cli = Cli::parse_from(["omni-strip"]);
        assert_eq!(cli.settings_overlay(), StripSettings::default());
    }
}
