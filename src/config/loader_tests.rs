//! Tests for configuration file loading.

use super::*;
use crate::model::Size;
use serial_test::serial;
use std::env;
use std::fs;

/// Removes the variable on creation and again on drop.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(name: &'static str) -> Self {
        env::remove_var(name);
        EnvGuard(name)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = env::temp_dir().join(name);
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn default_paths_live_under_tvgrid() {
    let config = default_config_path().expect("platform config dir");
    assert!(config.ends_with("tvgrid/config.toml"));
    let log = default_log_path();
    assert!(log.ends_with("tvgrid/tvgrid.log") || log == PathBuf::from("tvgrid.log"));
}

#[test]
fn missing_file_is_not_an_error() {
    let result = load_config_file("/nonexistent/path/to/tvgrid.toml").unwrap();
    assert_eq!(result, None);
}

#[test]
fn parses_every_field() {
    let path = write_temp(
        "tvgrid_test_full.toml",
        r#"
orientation = "vertical"
lanes = 4
focus_scroll_strategy = "item-visible"
gravity = "center-horizontal"
selected_scale = 1.1
scroll_enabled = false
focus_search_disabled = true
focus_out_front = true
focus_out_end = false
focus_frame_compensation = 30
log_file = "/tmp/tvgrid-test.log"

[module_cell_size]
width = 200
height = 120
"#,
    );

    let config = load_config_file(&path).unwrap().unwrap();
    assert_eq!(config.orientation, Some(Orientation::Vertical));
    assert_eq!(config.lanes, Some(4));
    assert_eq!(
        config.focus_scroll_strategy,
        Some(ScrollAlignmentPolicy::ItemVisible)
    );
    assert_eq!(config.module_cell_size, Some(Size::new(200, 120)));
    assert_eq!(config.focus_frame_compensation, Some(30));
    assert_eq!(config.log_file, Some(PathBuf::from("/tmp/tvgrid-test.log")));

    fs::remove_file(path).ok();
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let path = write_temp("tvgrid_test_invalid.toml", "lanes = [unterminated");
    let result = load_config_file(&path);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    fs::remove_file(path).ok();
}

#[test]
fn unknown_fields_are_rejected() {
    let path = write_temp("tvgrid_test_unknown.toml", "theme = \"dark\"\n");
    let result = load_config_file(&path);
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    fs::remove_file(path).ok();
}

#[test]
fn explicit_missing_path_is_not_found() {
    let result = load_config_with_precedence(Some(PathBuf::from("/nonexistent/tvgrid.toml")));
    assert!(matches!(result, Err(ConfigError::NotFound(_))));
}

#[test]
#[serial(tvgrid_config)]
fn explicit_path_wins_over_env_var() {
    let _guard = EnvGuard::new(CONFIG_ENV);
    let explicit = write_temp("tvgrid_test_explicit.toml", "lanes = 3\n");
    let from_env = write_temp("tvgrid_test_env_file.toml", "lanes = 5\n");
    env::set_var(CONFIG_ENV, &from_env);

    let config = load_config_with_precedence(Some(explicit.clone()))
        .unwrap()
        .unwrap();
    assert_eq!(config.lanes, Some(3));

    fs::remove_file(explicit).ok();
    fs::remove_file(from_env).ok();
}

#[test]
#[serial(tvgrid_config)]
fn env_var_is_used_without_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV);
    let from_env = write_temp("tvgrid_test_env_only.toml", "lanes = 5\n");
    env::set_var(CONFIG_ENV, &from_env);

    let config = load_config_with_precedence(None).unwrap().unwrap();
    assert_eq!(config.lanes, Some(5));

    fs::remove_file(from_env).ok();
}

#[test]
#[serial(tvgrid_env)]
fn env_overrides_replace_file_values() {
    let _scroll = EnvGuard::new(FOCUS_SCROLL_ENV);
    let _orientation = EnvGuard::new(ORIENTATION_ENV);
    env::set_var(FOCUS_SCROLL_ENV, "page");
    env::set_var(ORIENTATION_ENV, "vertical");

    let file = GridConfig {
        orientation: Some(Orientation::Horizontal),
        ..GridConfig::default()
    };
    let config = apply_env_overrides(file).unwrap();
    assert_eq!(config.focus_scroll_strategy, Some(ScrollAlignmentPolicy::Page));
    assert_eq!(config.orientation, Some(Orientation::Vertical));
}

#[test]
#[serial(tvgrid_env)]
fn unknown_env_value_is_invalid() {
    let _scroll = EnvGuard::new(FOCUS_SCROLL_ENV);
    let _orientation = EnvGuard::new(ORIENTATION_ENV);
    env::set_var(ORIENTATION_ENV, "diagonal");

    let result = apply_env_overrides(GridConfig::default());
    assert!(matches!(result, Err(ConfigError::Invalid(_))));
}

#[test]
#[serial(tvgrid_env)]
fn unset_env_leaves_config_alone() {
    let _scroll = EnvGuard::new(FOCUS_SCROLL_ENV);
    let _orientation = EnvGuard::new(ORIENTATION_ENV);
    let file = GridConfig {
        lanes: Some(3),
        ..GridConfig::default()
    };
    assert_eq!(apply_env_overrides(file.clone()).unwrap(), file);
}

#[test]
fn cli_flags_have_highest_precedence() {
    let file = GridConfig {
        lanes: Some(3),
        orientation: Some(Orientation::Vertical),
        selected_scale: Some(1.2),
        ..GridConfig::default()
    };
    let cli = CliOverrides {
        lanes: Some(1),
        strategy: Some(ScrollAlignmentPolicy::ItemVisible),
        orientation: None,
    };
    let config = apply_cli_overrides(file, &cli);
    assert_eq!(config.lanes, Some(1));
    assert_eq!(config.orientation, Some(Orientation::Vertical));
    assert_eq!(
        config.focus_scroll_strategy,
        Some(ScrollAlignmentPolicy::ItemVisible)
    );
    assert_eq!(config.selected_scale, Some(1.2));
}

#[test]
fn resolve_validates_and_defaults_log_path() {
    let resolved = resolve(&GridConfig::default()).unwrap();
    assert_eq!(resolved, ResolvedConfig::default());

    let bad = GridConfig {
        lanes: Some(0),
        ..GridConfig::default()
    };
    assert!(matches!(resolve(&bad), Err(ConfigError::Invalid(_))));
}

#[test]
fn resolve_keeps_configured_log_path() {
    let config = GridConfig {
        log_file: Some(PathBuf::from("/custom/tvgrid.log")),
        ..GridConfig::default()
    };
    let resolved = resolve(&config).unwrap();
    assert_eq!(resolved.log_file_path, PathBuf::from("/custom/tvgrid.log"));
}
