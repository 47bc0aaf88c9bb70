//! Builder options.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default bound on relationship recursion.
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Options controlling how instances are built.
///
/// Options can be set in code or loaded from TOML:
///
/// ```toml
/// minimal = true
/// seed = 42
/// max_depth = 8
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildOptions {
    /// Leave nullable fields unset.
    pub minimal: bool,

    /// Seed for the random source; `None` seeds from the operating system.
    pub seed: Option<u64>,

    /// How many relationship levels may be materialized below the
    /// requested entity.
    pub max_depth: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            minimal: false,
            seed: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl BuildOptions {
    /// Parse options from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load options from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = BuildOptions::default();
        assert!(!options.minimal);
        assert_eq!(options.seed, None);
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_from_toml() {
        let options = BuildOptions::from_toml_str("minimal = true\nseed = 7\n").unwrap();
        assert!(options.minimal);
        assert_eq!(options.seed, Some(7));
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);

        assert_eq!(BuildOptions::from_toml_str("").unwrap(), BuildOptions::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = BuildOptions::from_toml_str("minimum = true");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("builder.toml");
        std::fs::write(&path, "max_depth = 3").unwrap();

        let options = BuildOptions::from_file(&path).unwrap();
        assert_eq!(options.max_depth, 3);
        assert!(matches!(
            BuildOptions::from_file(dir.path().join("missing.toml")),
            Err(ConfigError::Io(_))
        ));
    }
}
