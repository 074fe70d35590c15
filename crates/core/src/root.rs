//! Root-directory discovery
//!
//! The project root is the first ancestor of the starting directory that
//! contains the marker file. All later stages resolve paths against the
//! discovered root; nothing reads the process working directory again.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::{CoreError, Result};

/// File that marks a directory as a rig project root
pub const ROOT_MARKER: &str = "RigProject.lua";

/// Walk from `start` up through its ancestors looking for the marker.
pub fn find_root(start: &Path) -> Result<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(ROOT_MARKER).is_file() {
            debug!("Found project root: {}", current.display());
            return Ok(current);
        }
        match current.parent() {
            Some(parent) => current = parent.to_path_buf(),
            None => {
                return Err(CoreError::RootNotFound {
                    marker: ROOT_MARKER,
                    start: start.to_path_buf(),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_finds_marker_in_start_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(ROOT_MARKER), "").unwrap();

        let root = find_root(dir.path()).unwrap();
        assert_eq!(root, dir.path());
    }

    #[test]
    fn test_walks_up_to_marker() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(ROOT_MARKER), "").unwrap();
        let nested = dir.path().join("src").join("deep");
        fs::create_dir_all(&nested).unwrap();

        let root = find_root(&nested).unwrap();
        assert_eq!(root, dir.path());
    }

    #[test]
    fn test_no_marker_anywhere() {
        let dir = TempDir::new().unwrap();
        let err = find_root(dir.path()).unwrap_err();
        assert!(matches!(err, CoreError::RootNotFound { .. }));
    }
}
