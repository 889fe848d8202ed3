//! Data folder resolution tests
//!
//! Tests that manipulate RADAR_BENCH_DATA or XDG_CONFIG_HOME are marked
//! #[serial] to prevent env-var races between parallel tests.

use radar_store::config::{
    default_data_folder, resolve_data_folder, DATA_FOLDER_ENV,
};
use serial_test::serial;
use std::env;
use std::path::PathBuf;

#[test]
#[serial]
fn no_overrides_resolves_to_platform_default() {
    env::remove_var(DATA_FOLDER_ENV);

    let folder = resolve_data_folder(None);

    assert!(!folder.as_os_str().is_empty());
    assert_eq!(folder, default_data_folder());
}

#[test]
#[serial]
fn env_var_overrides_default() {
    let dir = tempfile::tempdir().unwrap();
    env::set_var(DATA_FOLDER_ENV, dir.path());

    let folder = resolve_data_folder(None);

    assert_eq!(folder, dir.path());
    env::remove_var(DATA_FOLDER_ENV);
}

#[test]
#[serial]
fn explicit_argument_wins_over_env_var() {
    env::set_var(DATA_FOLDER_ENV, "/tmp/radar-bench-env");

    let folder = resolve_data_folder(Some("/tmp/radar-bench-explicit"));

    assert_eq!(folder, PathBuf::from("/tmp/radar-bench-explicit"));
    env::remove_var(DATA_FOLDER_ENV);
}

#[test]
#[serial]
#[cfg(target_os = "linux")]
fn config_file_supplies_data_folder() {
    env::remove_var(DATA_FOLDER_ENV);
    let config_home = tempfile::tempdir().unwrap();
    let app_dir = config_home.path().join("radar-bench");
    std::fs::create_dir_all(&app_dir).unwrap();
    std::fs::write(
        app_dir.join("config.toml"),
        "data_folder = \"/tmp/radar-bench-from-config\"\n",
    )
    .unwrap();

    let previous = env::var_os("XDG_CONFIG_HOME");
    env::set_var("XDG_CONFIG_HOME", config_home.path());

    let folder = resolve_data_folder(None);

    match previous {
        Some(value) => env::set_var("XDG_CONFIG_HOME", value),
        None => env::remove_var("XDG_CONFIG_HOME"),
    }

    assert_eq!(folder, PathBuf::from("/tmp/radar-bench-from-config"));
}

#[test]
#[serial]
fn empty_env_var_is_ignored() {
    env::set_var(DATA_FOLDER_ENV, "");

    let folder = resolve_data_folder(None);

    assert_eq!(folder, default_data_folder());
    env::remove_var(DATA_FOLDER_ENV);
}
