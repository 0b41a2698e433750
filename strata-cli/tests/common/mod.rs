//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary directories
//! - Command builder helpers with an isolated environment
//! - Config file fixtures

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Only the deprecated `[sql]` names.
pub const DEPRECATED_CONF: &str = "[sql]\nconnection = sqlite://deprecated\nidle_timeout = 54321\n";

/// Deprecated names, then the current names overriding them.
pub const DEPRECATED_OVERRIDE_CONF: &str = "[sql]\nconnection = sqlite://deprecated\nidle_timeout = 54321\n\n\
     [database]\nconnection = sqlite://new\nidle_timeout = 65432\n";

/// Test environment with an isolated home directory.
///
/// This struct provides an isolated test environment with:
/// - A temporary directory for config files
/// - `HOME` pointed into it so discovery never sees the real home
/// - Helper methods for common CLI operations
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Directory used as `HOME`
    pub home: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let home = temp_path.join("home");
        std::fs::create_dir_all(&home).expect("Failed to create home directory");

        Self {
            temp_dir,
            temp_path,
            home,
        }
    }

    /// Get a command builder for the strata binary.
    ///
    /// Environment variables that would change resolution are cleared and
    /// `HOME` points at this environment.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("strata").expect("Failed to find strata binary");
        cmd.env("HOME", &self.home)
            .env_remove("STRATA_CONFIG_FILE")
            .env_remove("STRATA_SCHEMA")
            .env_remove("STRATA_LOG_MODE")
            .env_remove("STRATA_OUTPUT_FORMAT");
        cmd
    }

    /// Get a command builder with `--config-file` set to `config`.
    pub fn command_with(&self, config: &Path) -> Command {
        let mut cmd = self.command();
        cmd.arg("--config-file").arg(config);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Create a subdirectory in the test environment.
    pub fn create_dir(&self, name: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::create_dir_all(&path).expect("Failed to create test directory");
        path
    }

    /// Write a file relative to the test environment, creating parents.
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, contents).expect("Failed to write test file");
        path
    }

    /// Run `strata get <option>` against `config` and return the trimmed output.
    ///
    /// # Panics
    /// Panics if the command fails.
    pub fn get(&self, config: &Path, option: &str) -> String {
        let output = self
            .command_with(config)
            .arg("get")
            .arg(option)
            .output()
            .expect("Failed to run get command");

        assert!(
            output.status.success(),
            "get failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        String::from_utf8(output.stdout)
            .expect("Invalid UTF-8 in output")
            .trim()
            .to_string()
    }
}
