//! rig-core: the build pipeline for rig
//!
//! Root discovery, cache and binaries-directory bootstrap, the workspace
//! context object, the solution loader (two-stage script compilation with
//! timestamp staleness), and the per-project builder.

mod builder;
mod cache;
mod error;
mod loader;
mod outdir;
mod root;
mod workspace;

pub use builder::ProjectBuilder;
pub use cache::Cache;
pub use error::CoreError;
pub use loader::{derive_namespace, needs_compile, SolutionLoader, ENTRY_NAME, SOLUTION_FILE};
pub use outdir::BINARIES_DIR;
pub use root::{find_root, ROOT_MARKER};
pub use workspace::Workspace;

// Re-export the pieces callers need alongside the pipeline
pub use rig_lua::{LoadedSolution, Project};
pub use rig_platform::{BuildConfig, Os, Target};

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
