use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{Result, SwError};

/// Directory listing used by the enumerator
pub trait FileLister {
    /// Entry names in `dir` in a stable order, or `None` if `dir` does not exist
    fn list_dir(&self, dir: &Path) -> Result<Option<Vec<String>>>;
}

/// Lists the local filesystem, sorted by name
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalLister;

impl FileLister for LocalLister {
    fn list_dir(&self, dir: &Path) -> Result<Option<Vec<String>>> {
        if !dir.is_dir() {
            debug!("Input directory {} does not exist, skipping", dir.display());
            return Ok(None);
        }

        let entries = fs::read_dir(dir).map_err(|e| SwError::ListDir(dir.to_path_buf(), e))?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| SwError::ListDir(dir.to_path_buf(), e))?;
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }

        names.sort();
        debug!("Listed {} entries in {}", names.len(), dir.display());
        Ok(Some(names))
    }
}
