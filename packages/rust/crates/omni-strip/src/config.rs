//! Strip configuration and layered settings loader.
//!
//! Loads and merges:
//! - User settings:    `<XDG_CONFIG_HOME or ~/.config>/omni-strip/settings.yaml`
//! - Project settings: `<cwd>/.omni-strip.yaml`
//!
//! Project settings override user settings; command-line flags override both.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::extensions::DEFAULT_EXTENSIONS;
use crate::stripper::{DEFAULT_CALLEE, DEFAULT_MAX_NESTING, MAX_NESTING_LIMIT};

const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;
const USER_SETTINGS_RELATIVE_PATH: &str = "omni-strip/settings.yaml";
const PROJECT_SETTINGS_FILE: &str = ".omni-strip.yaml";

/// Resolved configuration for a strip run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripConfig {
    /// Callee names whose calls are removed, e.g. `console.log`.
    pub callees: Vec<String>,
    /// Eligible file extensions (leading dot, case-sensitive).
    pub extensions: Vec<String>,
    /// Parenthesized nesting levels accepted inside call arguments.
    pub max_nesting_depth: usize,
    /// Files larger than this are reported and left alone.
    pub max_file_size: u64,
    /// Report what would change without writing.
    pub dry_run: bool,
    /// Write through a temp file + rename instead of overwriting in place.
    pub atomic_write: bool,
    /// Directory names never entered.
    pub skip_dirs: Vec<String>,
}

impl Default for StripConfig {
    fn default() -> Self {
        Self {
            callees: vec![DEFAULT_CALLEE.to_string()],
            extensions: DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect(),
            max_nesting_depth: DEFAULT_MAX_NESTING,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            dry_run: false,
            atomic_write: true,
            skip_dirs: Vec::new(),
        }
    }
}

/// One settings layer as read from YAML; unset fields fall through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[allow(missing_docs)] // mirrors StripConfig field for field
pub struct StripSettings {
    pub callees: Option<Vec<String>>,
    pub extensions: Option<Vec<String>>,
    pub max_nesting_depth: Option<usize>,
    pub max_file_size: Option<u64>,
    pub dry_run: Option<bool>,
    pub atomic_write: Option<bool>,
    pub skip_dirs: Option<Vec<String>>,
}

impl StripSettings {
    /// Layer `overlay` on top of `self`.
    #[must_use]
    pub fn merge(self, overlay: Self) -> Self {
        Self {
            callees: overlay.callees.or(self.callees),
            extensions: overlay.extensions.or(self.extensions),
            max_nesting_depth: overlay.max_nesting_depth.or(self.max_nesting_depth),
            max_file_size: overlay.max_file_size.or(self.max_file_size),
            dry_run: overlay.dry_run.or(self.dry_run),
            atomic_write: overlay.atomic_write.or(self.atomic_write),
            skip_dirs: overlay.skip_dirs.or(self.skip_dirs),
        }
    }

    /// Fill unset fields from defaults and validate.
    ///
    /// # Errors
    /// `ConfigError::Invalid` when no callee or extension remains, the
    /// nesting depth exceeds [`MAX_NESTING_LIMIT`], or the size limit is zero.
    pub fn resolve(self) -> Result<StripConfig, ConfigError> {
        let defaults = StripConfig::default();
        let config = StripConfig {
            callees: non_blank(self.callees.unwrap_or(defaults.callees)),
            extensions: non_blank(self.extensions.unwrap_or(defaults.extensions)),
            max_nesting_depth: self.max_nesting_depth.unwrap_or(defaults.max_nesting_depth),
            max_file_size: self.max_file_size.unwrap_or(defaults.max_file_size),
            dry_run: self.dry_run.unwrap_or(defaults.dry_run),
            atomic_write: self.atomic_write.unwrap_or(defaults.atomic_write),
            skip_dirs: non_blank(self.skip_dirs.unwrap_or(defaults.skip_dirs)),
        };

        if config.callees.is_empty() {
            return Err(ConfigError::Invalid("at least one callee is required".into()));
        }
        if config.extensions.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one file extension is required".into(),
            ));
        }
        if config.max_nesting_depth > MAX_NESTING_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "max_nesting_depth must be at most {MAX_NESTING_LIMIT} (got {})",
                config.max_nesting_depth
            )));
        }
        if config.max_file_size == 0 {
            return Err(ConfigError::Invalid("max_file_size must be positive".into()));
        }
        Ok(config)
    }
}

fn non_blank(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}

/// Load settings: an explicit file if given, otherwise user + project layers.
///
/// # Errors
/// Only an explicit file that cannot be read or parsed is an error; implicit
/// layers that are missing or broken are skipped with a warning.
pub fn load_settings(explicit: Option<&Path>) -> Result<StripSettings, ConfigError> {
    let (user, project) = settings_paths();
    let layered = load_settings_from_paths(&user, &project);
    match explicit {
        Some(path) => Ok(layered.merge(load_settings_file(path)?)),
        None => Ok(layered),
    }
}

/// Default `(user, project)` settings locations.
#[must_use]
pub fn settings_paths() -> (PathBuf, PathBuf) {
    let user = config_home().join(USER_SETTINGS_RELATIVE_PATH);
    let project = std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(PROJECT_SETTINGS_FILE);
    (user, project)
}

/// Merge the user and project layers, project winning.
#[must_use]
pub fn load_settings_from_paths(user: &Path, project: &Path) -> StripSettings {
    load_one(user).merge(load_one(project))
}

/// Read and parse one settings file strictly.
///
/// # Errors
/// `ConfigError::Read` / `ConfigError::Parse`.
pub fn load_settings_file(path: &Path) -> Result<StripSettings, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_settings(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_settings(raw: &str) -> Result<StripSettings, serde_yaml::Error> {
    if raw.trim().is_empty() {
        return Ok(StripSettings::default());
    }
    serde_yaml::from_str(raw)
}

fn load_one(path: &Path) -> StripSettings {
    if !path.exists() {
        return StripSettings::default();
    }
    match load_settings_file(path) {
        Ok(settings) => settings,
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to load settings file; ignoring"
            );
            StripSettings::default()
        }
    }
}

fn config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(|home| PathBuf::from(home).join(".config"))
        })
        .unwrap_or_else(|| PathBuf::from(".config"))
}
