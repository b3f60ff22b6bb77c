//! Boundary checks performed before dependent writes are attempted.

use crate::error::{Result, StreamError};
use std::path::Path;

/// Verify that `path` can be opened as a directory.
///
/// Regular files, dangling symlinks and unreadable directories all fail with
/// [`StreamError::DirectoryDoesNotExist`].
pub fn directory_exists(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    match std::fs::read_dir(path) {
        Ok(_) => Ok(()),
        Err(e) => {
            log::debug!("directory check failed for {}: {}", path.display(), e);
            Err(StreamError::DirectoryDoesNotExist {
                path: path.to_path_buf(),
            })
        }
    }
}
