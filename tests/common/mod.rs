//! Common test utilities

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use sw::core::Executor;
use sw::error::{Result, SwError};

/// Create a work area with a data directory
pub fn create_test_area() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let root = temp_dir.path().to_path_buf();
    fs::create_dir_all(root.join("data")).expect("Failed to create data dir");
    (temp_dir, root)
}

/// Create empty input files inside `dir`
pub fn create_input_files(dir: &Path, names: &[&str]) {
    fs::create_dir_all(dir).expect("Failed to create input dir");
    for name in names {
        fs::write(dir.join(name), "").expect("Failed to write input file");
    }
}

/// Write a config document and return its path
pub fn write_config(root: &Path, name: &str, contents: &str) -> PathBuf {
    let path = root.join(name);
    fs::write(&path, contents).expect("Failed to write config");
    path
}

/// Records every call instead of spawning swif
#[derive(Default)]
pub struct RecordingExecutor {
    pub calls: Vec<Vec<String>>,
    /// 1-based call number that fails
    pub fail_on: Option<usize>,
}

impl Executor for RecordingExecutor {
    fn execute(&mut self, program: &str, args: &[String]) -> Result<()> {
        assert_eq!(program, "swif");
        self.calls.push(args.to_vec());
        if self.fail_on == Some(self.calls.len()) {
            return Err(SwError::Subprocess {
                command: format!("{} {}", program, args.join(" ")),
                code: Some(1),
            });
        }
        Ok(())
    }
}
