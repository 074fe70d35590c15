//! Error types for rig-lua

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while compiling or loading build definitions
#[derive(Debug, Error)]
pub enum LuaError {
    #[error("Lua runtime error: {0}")]
    Runtime(#[from] mlua::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Platform error: {0}")]
    Platform(#[from] rig_platform::PlatformError),

    #[error("Artifact not found: {0}")]
    ArtifactNotFound(PathBuf),

    #[error("Solution entry '{0}' was not found in the loaded script")]
    EntryNotFound(String),

    #[error("Invalid solution entry: {0}")]
    InvalidEntry(String),

    #[error("Project name cannot be empty")]
    EmptyProjectName,
}
