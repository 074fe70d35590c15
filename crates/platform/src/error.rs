//! Error types for rig-platform

use thiserror::Error;

/// Errors that can occur in platform operations
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Unrecognized host operating system: {0}")]
    UnknownHost(String),
}
