//! Error types for rig-core

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the build pipeline
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Lua error: {0}")]
    Lua(#[from] rig_lua::LuaError),

    #[error("Platform error: {0}")]
    Platform(#[from] rig_platform::PlatformError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No project root found: no '{marker}' in '{start}' or any parent directory")]
    RootNotFound { marker: &'static str, start: PathBuf },

    #[error("Build definition not found: {0}")]
    SolutionNotFound(PathBuf),

    #[error("Failed to compile build definition to {0}")]
    ScriptCompile(PathBuf),

    #[error("Failed to build project '{0}'")]
    ProjectBuild(String),
}
