//! Build configuration enumeration

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a solution is being built
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildConfig {
    #[default]
    Debug,
    Production,
}

impl BuildConfig {
    /// All member names, in declaration order. Used to render the valid
    /// `code:value` set when a command-line value fails to parse.
    pub const fn variants() -> &'static [&'static str] {
        &["Debug", "Production"]
    }

    /// Case-insensitive parse against the member names
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("debug") {
            Some(BuildConfig::Debug)
        } else if value.eq_ignore_ascii_case("production") {
            Some(BuildConfig::Production)
        } else {
            None
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            BuildConfig::Debug => "Debug",
            BuildConfig::Production => "Production",
        }
    }
}

impl fmt::Display for BuildConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(BuildConfig::parse("debug"), Some(BuildConfig::Debug));
        assert_eq!(BuildConfig::parse("PRODUCTION"), Some(BuildConfig::Production));
        assert_eq!(BuildConfig::parse("Production"), Some(BuildConfig::Production));
        assert_eq!(BuildConfig::parse("bogus"), None);
    }

    #[test]
    fn test_variants_match_members() {
        let variants = BuildConfig::variants();
        assert_eq!(variants.len(), 2);
        for name in variants {
            assert!(BuildConfig::parse(name).is_some());
        }
    }
}
