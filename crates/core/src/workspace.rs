//! The workspace context object
//!
//! Built once at startup and passed through every stage, replacing the
//! ambient state (current directory, singleton cache) a build tool might
//! otherwise lean on.

use std::path::{Path, PathBuf};
use tracing::info;

use rig_platform::{BuildConfig, Target};

use crate::cache::Cache;
use crate::outdir;
use crate::root::find_root;
use crate::Result;

/// Everything the pipeline stages need: root, cache paths, binaries
/// directory, and the target descriptor.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    cache: Cache,
    binaries_dir: PathBuf,
    target: Target,
}

impl Workspace {
    /// Discover the root from `start`, bootstrap the cache and binaries
    /// directories, and detect the host target.
    pub fn discover(start: &Path, config: BuildConfig) -> Result<Self> {
        let root = find_root(start)?;
        let target = Target::host(config)?;
        info!("Using root {} for target {}", root.display(), target);
        Self::at_root(root, target)
    }

    /// Build a workspace for an already-known root.
    pub fn at_root(root: PathBuf, target: Target) -> Result<Self> {
        let cache = Cache::initialize(&root)?;
        let binaries_dir = outdir::initialize(&root)?;
        Ok(Self {
            root,
            cache,
            binaries_dir,
            target,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn binaries_dir(&self) -> &Path {
        &self.binaries_dir
    }

    pub fn target(&self) -> Target {
        self.target
    }

    /// Resolve a project-relative path against the root.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::root::ROOT_MARKER;
    use rig_platform::Os;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_discover_bootstraps_directories() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(ROOT_MARKER), "").unwrap();
        let nested = dir.path().join("src");
        fs::create_dir_all(&nested).unwrap();

        let workspace = Workspace::discover(&nested, BuildConfig::Debug).unwrap();
        assert_eq!(workspace.root(), dir.path());
        assert!(workspace.cache().scratch_dir().is_dir());
        assert!(workspace.binaries_dir().is_dir());
        assert_eq!(workspace.target().config, BuildConfig::Debug);
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let dir = TempDir::new().unwrap();
        let target = Target::new(Os::Linux, BuildConfig::Debug);
        let workspace = Workspace::at_root(dir.path().to_path_buf(), target).unwrap();

        assert_eq!(workspace.resolve("src/main.lua"), dir.path().join("src/main.lua"));
        let absolute = dir.path().join("gen.lua");
        assert_eq!(workspace.resolve(absolute.to_str().unwrap()), absolute);
    }
}
