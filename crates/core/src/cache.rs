//! Hidden cache directory bootstrap
//!
//! `.rig/` under the root holds compiled script artifacts; its `tmp/`
//! subdirectory is compiler scratch space and the backing store for the
//! `create_file` factory. One running instance per root is assumed; there
//! is no inter-process locking.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::Result;

/// Cache directory name, relative to the root. The leading dot keeps it
/// hidden on Unix-like hosts.
pub const CACHE_DIR: &str = ".rig";

/// Scratch subdirectory name inside the cache
const SCRATCH_DIR: &str = "tmp";

/// Initialized cache paths for one root
#[derive(Debug, Clone)]
pub struct Cache {
    cache_dir: PathBuf,
    scratch_dir: PathBuf,
}

impl Cache {
    /// Create the cache and scratch directories if missing. Idempotent.
    pub fn initialize(root: &Path) -> Result<Self> {
        let cache_dir = root.join(CACHE_DIR);
        let scratch_dir = cache_dir.join(SCRATCH_DIR);
        fs::create_dir_all(&scratch_dir)?;
        debug!("Cache initialized at {}", cache_dir.display());
        Ok(Self {
            cache_dir,
            scratch_dir,
        })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }
}
