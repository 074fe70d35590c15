//! Host operating system detection

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::error::PlatformError;

/// Operating system a build runs on or targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    Linux,
    Darwin,
    Windows,
}

impl Os {
    /// Detect the host operating system.
    ///
    /// Unlike a compile-time constant, this reports an error for hosts
    /// the orchestrator does not know how to drive.
    pub fn host() -> crate::Result<Self> {
        let os = Self::from_name(std::env::consts::OS)
            .ok_or_else(|| PlatformError::UnknownHost(std::env::consts::OS.to_string()))?;
        debug!("Detected host OS: {}", os);
        Ok(os)
    }

    /// Parse an OS from its target-string name. Accepts both the
    /// `std::env::consts::OS` spelling and the target-string spelling
    /// for macOS.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "linux" => Some(Os::Linux),
            "macos" | "darwin" => Some(Os::Darwin),
            "windows" => Some(Os::Windows),
            _ => None,
        }
    }

    /// Returns the OS name as used in target strings
    pub const fn as_str(&self) -> &'static str {
        match self {
            Os::Linux => "linux",
            Os::Darwin => "darwin",
            Os::Windows => "windows",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_detection() {
        // The test suite only runs on supported hosts
        let os = Os::host().unwrap();
        assert!(!os.as_str().is_empty());
    }

    #[test]
    fn test_unknown_host_name() {
        assert!(Os::from_name("plan9").is_none());
        assert_eq!(Os::from_name("linux"), Some(Os::Linux));
        assert_eq!(Os::from_name("macos"), Some(Os::Darwin));
        assert_eq!(Os::from_name("darwin"), Some(Os::Darwin));
    }
}
