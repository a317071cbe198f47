//! Tests for settings layering and resolution.

use std::fs;

use tempfile::TempDir;

use omni_strip::config::{load_settings_file, load_settings_from_paths};
use omni_strip::{ConfigError, StripConfig};

#[test]
fn test_project_layer_overrides_user_layer() {
    let dir = TempDir::new().expect("Create temp dir");
    let user = dir.path().join("user.yaml");
    let project = dir.path().join("project.yaml");
    fs::write(
        &user,
        "callees: [console.log, console.debug]\ndry_run: true\nmax_nesting_depth: 3\n",
    )
    .expect("Write user");
    fs::write(&project, "callees: [console.info]\nskip_dirs: [dist]\n").expect("Write project");

    let config = load_settings_from_paths(&user, &project)
        .resolve()
        .expect("Resolve");

    assert_eq!(config.callees, vec!["console.info".to_string()]);
    assert!(config.dry_run);
    assert_eq!(config.max_nesting_depth, 3);
    assert_eq!(config.skip_dirs, vec!["dist".to_string()]);
    assert_eq!(config.extensions, StripConfig::default().extensions);
}

#[test]
fn test_missing_and_broken_layers_are_ignored() {
    let dir = TempDir::new().expect("Create temp dir");
    let broken = dir.path().join("broken.yaml");
    fs::write(&broken, "callees: [unclosed\n").expect("Write broken");

    let config = load_settings_from_paths(&dir.path().join("absent.yaml"), &broken)
        .resolve()
        .expect("Resolve");

    assert_eq!(config, StripConfig::default());
}

#[test]
fn test_explicit_file_errors_are_surfaced() {
    let dir = TempDir::new().expect("Create temp dir");
    assert!(matches!(
        load_settings_file(&dir.path().join("absent.yaml")),
        Err(ConfigError::Read { .. })
    ));

    let broken = dir.path().join("broken.yaml");
    fs::write(&broken, "max_file_size: lots\n").expect("Write broken");
    assert!(matches!(
        load_settings_file(&broken),
        Err(ConfigError::Parse { .. })
    ));
}

#[test]
fn test_zero_size_limit_is_invalid() {
    let dir = TempDir::new().expect("Create temp dir");
    let path = dir.path().join("settings.yaml");
    fs::write(&path, "max_file_size: 0\n").expect("Write settings");

    let settings = load_settings_file(&path).expect("Parse");
    assert!(matches!(settings.resolve(), Err(ConfigError::Invalid(_))));
}
