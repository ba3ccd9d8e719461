//! Test utilities for Stencil crates.

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a temporary directory that is cleaned up on drop.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Writes `content` to `dir/name`, creating parent directories.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    std::fs::write(&path, content).expect("Failed to write temp file");
    path
}

/// A template, values file and output path laid out like a project:
/// `template/template.yaml`, `template/values.yaml`, `parsed/parsed.yaml`.
pub struct RenderFixture {
    pub dir: TempDir,
    pub template: PathBuf,
    pub values: PathBuf,
    pub output: PathBuf,
}

impl RenderFixture {
    /// Writes the template and values; the output directory is created empty.
    pub fn new(template: &str, values: &str) -> Self {
        let dir = temp_dir();
        let template = write_file(dir.path(), "template/template.yaml", template);
        let values = write_file(dir.path(), "template/values.yaml", values);
        let output = dir.path().join("parsed/parsed.yaml");
        std::fs::create_dir_all(dir.path().join("parsed")).expect("Failed to create output dir");

        Self {
            dir,
            template,
            values,
            output,
        }
    }

    /// Root of the fixture.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Contents of the output file.
    pub fn output_contents(&self) -> String {
        std::fs::read_to_string(&self.output).expect("Failed to read output file")
    }
}

/// Assert that a Result is Ok and return the value.
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a Result is Err and return the error.
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
