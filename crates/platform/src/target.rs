//! Target descriptor: host/target OS paired with a build configuration

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{BuildConfig, Os};

/// What a solution is being built for. Handed to the build-definition
/// script's constructor so scripts can branch on OS or configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub os: Os,
    pub config: BuildConfig,
}

impl Target {
    pub const fn new(os: Os, config: BuildConfig) -> Self {
        Self { os, config }
    }

    /// Target descriptor for the detected host OS
    pub fn host(config: BuildConfig) -> crate::Result<Self> {
        Ok(Self::new(Os::host()?, config))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os, self.config)
    }
}
