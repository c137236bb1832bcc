//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use r2::config::AppConfig;
use r2_term::TermColor;
use serial_test::serial;
use std::fs;
use std::path::PathBuf;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("r2_config_{}_{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("R2_VIEWER__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("R2_VIEWER__TITLE");
    assert_eq!(config.viewer.title, "Test From Env");
}

#[test]
#[serial]
fn test_default_file_loading() {
    std::env::remove_var("R2_VIEWER__TITLE");

    let cwd = std::env::current_dir().unwrap();
    assert!(cwd.join("config/default.toml").exists());

    let config = AppConfig::load().unwrap();
    assert_eq!(config.camera.fov, 45.0);
    assert_eq!(config.viewer.glyph_color, TermColor::Cyan);
    assert_eq!(config.debug.log_level, "info");
}

#[test]
#[serial]
fn test_user_file_overrides_default() {
    let dir = scratch_dir("user");
    fs::write(dir.join("default.toml"), "[viewer]\ncolumns = 50\nrows = 20\n").unwrap();
    fs::write(dir.join("user.toml"), "[viewer]\nrows = 30\nglyph_color = \"magenta\"\n").unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    fs::remove_dir_all(&dir).unwrap();

    assert_eq!(config.viewer.columns, 50);
    assert_eq!(config.viewer.rows, 30);
    assert_eq!(config.viewer.glyph_color, TermColor::Magenta);
}

#[test]
#[serial]
fn test_env_beats_user_file() {
    let dir = scratch_dir("env");
    fs::write(dir.join("user.toml"), "[camera]\nfov = 60.0\n").unwrap();
    std::env::set_var("R2_CAMERA__FOV", "75.0");

    let config = AppConfig::load_from(&dir);
    std::env::remove_var("R2_CAMERA__FOV");
    fs::remove_dir_all(&dir).unwrap();

    assert_eq!(config.unwrap().camera.fov, 75.0);
}

#[test]
#[serial]
fn test_missing_directory_gives_defaults() {
    let config = AppConfig::load_from("does/not/exist").unwrap();
    assert_eq!(config.viewer.columns, 72);
}

#[test]
#[serial]
fn test_invalid_values_are_rejected() {
    let dir = scratch_dir("invalid");
    fs::write(dir.join("default.toml"), "[camera]\nnear = 10.0\nfar = 1.0\n").unwrap();

    let result = AppConfig::load_from(&dir);
    fs::remove_dir_all(&dir).unwrap();

    let err = result.unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}

#[test]
#[serial]
fn test_bad_type_is_a_config_error() {
    let dir = scratch_dir("badtype");
    fs::write(dir.join("default.toml"), "[viewer]\ncolumns = \"wide\"\n").unwrap();

    let result = AppConfig::load_from(&dir);
    fs::remove_dir_all(&dir).unwrap();

    assert!(result.is_err());
}
