//! Common test utilities for CLI testing.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Output;

use assert_cmd::Command;
use stencil_test_utils::{write_file, RenderFixture};

/// Test context: a project laid out with the default paths.
pub struct TestContext {
    pub fixture: RenderFixture,
}

impl TestContext {
    pub fn new(template: &str, values: &str) -> Self {
        Self {
            fixture: RenderFixture::new(template, values),
        }
    }

    /// Write `.stencil/config.yaml` in the project.
    pub fn with_project_config(self, config: &str) -> Self {
        write_file(self.path(), ".stencil/config.yaml", config);
        self
    }

    /// Write an extra file relative to the project root.
    pub fn with_file(self, name: &str, content: &str) -> Self {
        write_file(self.path(), name, content);
        self
    }

    /// Get path to the project root
    pub fn path(&self) -> &Path {
        self.fixture.path()
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.path().join(name)
    }

    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.file(name)).expect("Failed to read file")
    }

    /// Create a command running in the project root with a clean environment
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("stencil").expect("Binary not found");
        cmd.current_dir(self.path())
            .env_remove("STENCIL_CONFIG")
            .env_remove("STENCIL_LOG_LEVEL")
            .env_remove("STENCIL_LOG_FILE")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }
}

/// Assert helpers for CLI output
pub trait OutputAssertions {
    fn assert_success(&self);
    fn assert_failure(&self);
    fn assert_stdout_contains(&self, text: &str);
    fn assert_stderr_contains(&self, text: &str);
    fn assert_exit_code(&self, code: i32);
}

impl OutputAssertions for Output {
    fn assert_success(&self) {
        assert!(
            self.status.success(),
            "Command failed with status: {}\nstderr: {}",
            self.status,
            String::from_utf8_lossy(&self.stderr)
        );
    }

    fn assert_failure(&self) {
        assert!(
            !self.status.success(),
            "Command succeeded unexpectedly\nstdout: {}",
            String::from_utf8_lossy(&self.stdout)
        );
    }

    fn assert_stdout_contains(&self, text: &str) {
        let stdout = String::from_utf8_lossy(&self.stdout);
        assert!(
            stdout.contains(text),
            "stdout did not contain '{text}'\nstdout: {stdout}"
        );
    }

    fn assert_stderr_contains(&self, text: &str) {
        let stderr = String::from_utf8_lossy(&self.stderr);
        assert!(
            stderr.contains(text),
            "stderr did not contain '{text}'\nstderr: {stderr}"
        );
    }

    fn assert_exit_code(&self, code: i32) {
        assert_eq!(
            self.status.code(),
            Some(code),
            "Expected exit code {}, got {:?}",
            code,
            self.status.code()
        );
    }
}
