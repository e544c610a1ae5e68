use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::helpers::HarnessError;

/// The directory the export tool writes into during a run.
///
/// Prepared empty at the start of a run and removed once it is no longer
/// needed.
#[derive(Debug)]
pub struct ResultDir {
    path: PathBuf,
}

fn dir_error(path: &Path, e: std::io::Error) -> HarnessError {
    HarnessError::ResultDir {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

impl ResultDir {
    /// Remove any previous contents and create the directory.
    pub fn prepare(path: &Path) -> Result<Self, HarnessError> {
        if path.exists() {
            debug!(path = %path.display(), "removing previous results");
            fs::remove_dir_all(path).map_err(|e| dir_error(path, e))?;
        }
        fs::create_dir_all(path).map_err(|e| dir_error(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the directory and everything in it.
    pub fn remove(self) -> Result<(), HarnessError> {
        debug!(path = %self.path.display(), "removing results");
        fs::remove_dir_all(&self.path).map_err(|e| dir_error(&self.path, e))
    }
}
