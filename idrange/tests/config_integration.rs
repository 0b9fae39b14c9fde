//! Integration tests for the configuration system.
//!
//! Tests that modify environment variables are marked with `#[serial]`;
//! environment variables are process-global, so concurrent access would
//! race.

use idrange::config::{Config, ConfigBuilder, OutputFormat};
use idrange::{AllocationPlanner, AllocationRequest, HighWaterMark};
use serial_test::serial;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const ENV_KEYS: [&str; 5] = [
    "IDRANGE_SHIFT",
    "IDRANGE_MARGIN",
    "IDRANGE_DEFAULT_SIZE",
    "IDRANGE_NAME_PREFIX",
    "IDRANGE_OUTPUT_FORMAT",
];

fn create_temp_config(dir: &Path, filename: &str, content: &str) -> PathBuf {
    let path = dir.join(filename);
    fs::write(&path, content).unwrap();
    path
}

/// RAII guard for setting and restoring an environment variable.
struct EnvGuard {
    key: String,
    old_value: Option<String>,
}

impl EnvGuard {
    fn new(key: &str, value: &str) -> Self {
        let old_value = env::var(key).ok();
        env::set_var(key, value);
        Self {
            key: key.to_string(),
            old_value,
        }
    }

    fn remove(key: &str) -> Self {
        let old_value = env::var(key).ok();
        env::remove_var(key);
        Self {
            key: key.to_string(),
            old_value,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.old_value {
            Some(val) => env::set_var(&self.key, val),
            None => env::remove_var(&self.key),
        }
    }
}

fn clear_env() -> Vec<EnvGuard> {
    ENV_KEYS.iter().map(|k| EnvGuard::remove(k)).collect()
}

/// A builder isolated from the real home directory.
fn isolated(temp: &TempDir, working_dir: &Path) -> ConfigBuilder {
    ConfigBuilder::new()
        .with_working_dir(working_dir)
        .with_user_dir(&temp.path().join("home"))
}

#[test]
fn test_project_file_found_from_nested_dir() {
    let temp = TempDir::new().unwrap();
    let child = temp.path().join("tests").join("webui");
    fs::create_dir_all(&child).unwrap();
    create_temp_config(temp.path(), "idrange.yaml", "shift: 1000\n");

    let config = isolated(&temp, &child).skip_env().build().unwrap();
    assert_eq!(config.shift, Some(1000));
}

#[test]
fn test_user_file_below_project_file() {
    let temp = TempDir::new().unwrap();
    let home = temp.path().join("home");
    let project = temp.path().join("project");
    fs::create_dir_all(&home).unwrap();
    fs::create_dir_all(&project).unwrap();
    create_temp_config(&home, "config.yaml", "margin: 5\nname_prefix: user\n");
    create_temp_config(&project, "idrange.yaml", "name_prefix: project\n");

    let config = isolated(&temp, &project).skip_env().build().unwrap();
    assert_eq!(config.margin, Some(5));
    assert_eq!(config.name_prefix.as_deref(), Some("project"));
}

#[test]
fn test_invalid_project_file_is_error() {
    let temp = TempDir::new().unwrap();
    create_temp_config(temp.path(), "idrange.yaml", "shift: [1, 2]\n");

    let err = isolated(&temp, temp.path()).skip_env().build().unwrap_err();
    assert!(err.to_string().contains("idrange.yaml"));
}

#[test]
fn test_validation_runs_on_merged_result() {
    let temp = TempDir::new().unwrap();
    create_temp_config(temp.path(), "idrange.yaml", "default_size: 0\n");

    let err = isolated(&temp, temp.path()).skip_env().build().unwrap_err();
    assert!(err.to_string().contains("default_size"));
}

#[test]
#[serial]
fn test_env_overrides_files() {
    let _clean = clear_env();
    let temp = TempDir::new().unwrap();
    create_temp_config(temp.path(), "idrange.yaml", "shift: 1\noutput_format: yaml\n");

    let _shift = EnvGuard::new("IDRANGE_SHIFT", "7");
    let config = isolated(&temp, temp.path()).build().unwrap();
    assert_eq!(config.shift, Some(7));
    assert_eq!(config.output_format, Some(OutputFormat::Yaml));
}

#[test]
#[serial]
fn test_programmatic_overrides_env() {
    let _clean = clear_env();
    let temp = TempDir::new().unwrap();
    let _prefix = EnvGuard::new("IDRANGE_NAME_PREFIX", "from-env");

    let config = isolated(&temp, temp.path())
        .with_config(Config {
            name_prefix: Some("from-code".into()),
            ..Default::default()
        })
        .build()
        .unwrap();
    assert_eq!(config.name_prefix.as_deref(), Some("from-code"));
}

#[test]
#[serial]
fn test_bad_env_value_is_error() {
    let _clean = clear_env();
    let temp = TempDir::new().unwrap();
    let _size = EnvGuard::new("IDRANGE_DEFAULT_SIZE", "fifty");

    assert!(isolated(&temp, temp.path()).build().is_err());
}

#[test]
#[serial]
fn test_policy_drives_planner() {
    let _clean = clear_env();
    let temp = TempDir::new().unwrap();
    create_temp_config(
        temp.path(),
        "idrange.yaml",
        "shift: 10\ndefault_size: 5\nname_prefix: ci\n",
    );

    let policy = isolated(&temp, temp.path()).build_policy().unwrap();
    let mut planner = AllocationPlanner::new(HighWaterMark::default(), policy);
    let plan = planner.plan(&AllocationRequest::local()).unwrap();

    assert_eq!(plan.base_id(), 10);
    assert_eq!(plan.size(), 5);
    assert_eq!(plan.secondary_base_rid(), Some(25));
    assert!(plan.name().starts_with("ci-"));
}
