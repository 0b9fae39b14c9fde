//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Recorded server responses written into that directory
//! - Command builders isolated from the caller's configuration

use assert_cmd::Command;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Environment variables the CLI reads; cleared for every test command.
const IDRANGE_ENV: &[&str] = &[
    "IDRANGE_CONFIG",
    "IDRANGE_LOG_MODE",
    "IDRANGE_SHIFT",
    "IDRANGE_MARGIN",
    "IDRANGE_DEFAULT_SIZE",
    "IDRANGE_NAME_PREFIX",
    "IDRANGE_OUTPUT_FORMAT",
];

/// Test environment with an isolated working and home directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            temp_path,
        }
    }

    /// Get a command builder running inside the temp directory.
    ///
    /// `HOME` points at the temp directory and every `IDRANGE_*` variable is
    /// removed, so no configuration leaks in from the machine running tests.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("idrange").expect("Failed to find idrange binary");
        cmd.current_dir(&self.temp_path).env("HOME", &self.temp_path);
        for var in IDRANGE_ENV {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a file under the temp directory and return its path.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Write a recorded `idrange_find` response holding `ranges`.
    pub fn write_ranges(&self, ranges: &[Value]) -> PathBuf {
        self.write_file("idrange_find.json", &find_response(ranges).to_string())
    }

    /// Write a recorded `trust_find` response holding `domains`.
    pub fn write_trusts(&self, domains: &[&str]) -> PathBuf {
        let entries: Vec<Value> = domains.iter().map(|d| json!({"cn": [d]})).collect();
        self.write_file("trust_find.json", &find_response(&entries).to_string())
    }

    /// The default installation range as the server reports it.
    pub fn write_default_ranges(&self) -> PathBuf {
        self.write_ranges(&[local_range("EXAMPLE.TEST_id_range", 1000, 200_000, 1000, 100_000_000)])
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// A local range entry with every attribute set.
#[allow(dead_code)]
pub fn local_range(name: &str, base_id: u64, size: u64, base_rid: u64, secondary: u64) -> Value {
    json!({
        "cn": [name],
        "ipabaseid": [base_id.to_string()],
        "ipaidrangesize": [size.to_string()],
        "ipabaserid": [base_rid.to_string()],
        "ipasecondarybaserid": [secondary.to_string()],
        "iparangetype": ["ipa-local"],
    })
}

/// A range entry carrying only a base ID, size and primary RID.
#[allow(dead_code)]
pub fn bare_range(name: &str, base_id: u64, size: u64, base_rid: u64) -> Value {
    json!({
        "cn": [name],
        "ipabaseid": [base_id.to_string()],
        "ipaidrangesize": [size.to_string()],
        "ipabaserid": [base_rid.to_string()],
    })
}

fn find_response(entries: &[Value]) -> Value {
    json!({"result": {"count": entries.len(), "result": entries}, "error": null})
}

/// Parse stdout as JSON.
#[allow(dead_code)]
pub fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}
