use std::path::PathBuf;
use thiserror::Error;

use crate::models::ConfigError;

/// Main error type for sw
#[derive(Error, Debug)]
pub enum SwError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Path to {} does not exist:\n{}", what, path.display())]
    PathNotFound { what: &'static str, path: PathBuf },

    #[error("Failed to list directory {0}: {1}")]
    ListDir(PathBuf, std::io::Error),

    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("Command failed ({}): {}", describe_code(*code), command)]
    Subprocess { command: String, code: Option<i32> },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(c) => format!("exit status {}", c),
        None => "terminated by signal".to_string(),
    }
}

impl SwError {
    /// Process exit status to report for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SwError::PathNotFound { .. } => 2,
            SwError::Subprocess { code: Some(c), .. } if *c != 0 => *c,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, SwError>;
