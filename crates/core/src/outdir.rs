//! Binaries output directory bootstrap

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::Result;

/// Directory under the root that receives compiled project artifacts
pub const BINARIES_DIR: &str = "Binaries";

/// Create the binaries directory if missing and return its path.
pub fn initialize(root: &Path) -> Result<PathBuf> {
    let binaries = root.join(BINARIES_DIR);
    if !binaries.is_dir() {
        fs::create_dir_all(&binaries)?;
    }
    debug!("Binaries directory at {}", binaries.display());
    Ok(binaries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_creates_directory() {
        let dir = TempDir::new().unwrap();
        let binaries = initialize(dir.path()).unwrap();
        assert!(binaries.is_dir());
        assert_eq!(binaries, dir.path().join("Binaries"));
    }
}
