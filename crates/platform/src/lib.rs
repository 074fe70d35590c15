//! Platform detection and target descriptors for rig
//!
//! This crate provides:
//! - Host OS detection (fallible: an unrecognized host is an error)
//! - The build configuration enumeration
//! - The target descriptor handed to build-definition scripts

mod config;
mod error;
mod platform;
mod target;

pub use config::BuildConfig;
pub use error::PlatformError;
pub use platform::Os;
pub use target::Target;

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
