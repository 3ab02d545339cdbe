//! Core configuration types for omo-profiles

use std::path::PathBuf;

use crate::paths::{EnvSource, StoragePaths};
use crate::storage::JsonStorage;

/// Number of backups kept after a profile switch unless configured otherwise
pub const DEFAULT_BACKUP_RETENTION: usize = 10;

/// Configuration for initializing the ProfileManager
#[derive(Debug, Clone)]
pub struct ProfilesConfig {
    /// Where profiles, backups and the active config live
    pub paths: StoragePaths,

    /// JSON style used for profile and active config writes
    pub storage: JsonStorage,

    /// Backups kept after automatic pruning (`None` disables pruning)
    pub backup_retention: Option<usize>,
}

impl Default for ProfilesConfig {
    fn default() -> Self {
        Self {
            paths: StoragePaths::default_location(),
            storage: JsonStorage::new(),
            backup_retention: Some(DEFAULT_BACKUP_RETENTION),
        }
    }
}

impl ProfilesConfig {
    /// Create a new builder for ProfilesConfig
    ///
    /// # Example
    /// ```rust
    /// use omo_profiles::ProfilesConfig;
    ///
    /// let config = ProfilesConfig::builder()
    ///     .base_dir("/tmp/opencode")
    ///     .backup_retention(5)
    ///     .build();
    /// assert_eq!(config.backup_retention, Some(5));
    /// ```
    pub fn builder() -> ProfilesConfigBuilder {
        ProfilesConfigBuilder::new()
    }

    /// Configuration rooted at `base_dir`, everything else default
    pub fn at(base_dir: impl Into<PathBuf>) -> Self {
        Self::builder().base_dir(base_dir).build()
    }
}

/// Builder for creating ProfilesConfig with a fluent API
#[derive(Debug, Clone)]
pub struct ProfilesConfigBuilder {
    base_dir: Option<PathBuf>,
    active_file: Option<String>,
    env_base_dir: Option<StoragePaths>,
    pretty_json: bool,
    backup_retention: Option<usize>,
}

impl Default for ProfilesConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfilesConfigBuilder {
    pub fn new() -> Self {
        Self {
            base_dir: None,
            active_file: None,
            env_base_dir: None,
            pretty_json: true,
            backup_retention: Some(DEFAULT_BACKUP_RETENTION),
        }
    }

    /// Set the base directory
    ///
    /// Supports `~` expansion for home directory. Takes precedence over
    /// [`Self::from_env`].
    pub fn base_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(path.into());
        self
    }

    /// Forget any explicit base directory and use the platform default
    pub fn reset_base_dir(mut self) -> Self {
        self.base_dir = None;
        self.env_base_dir = None;
        self
    }

    /// Resolve the base directory from the environment when none is set
    pub fn from_env(mut self, env: &dyn EnvSource) -> Self {
        self.env_base_dir = Some(StoragePaths::from_env(env));
        self
    }

    /// Set the active config filename (default: "oh-my-opencode.json")
    pub fn active_file(mut self, filename: impl Into<String>) -> Self {
        self.active_file = Some(filename.into());
        self
    }

    /// Use compact JSON (no pretty printing)
    pub fn compact_json(mut self) -> Self {
        self.pretty_json = false;
        self
    }

    /// Keep at most `keep` backups after automatic pruning
    pub fn backup_retention(mut self, keep: usize) -> Self {
        self.backup_retention = Some(keep);
        self
    }

    /// Never prune backups automatically
    pub fn keep_all_backups(mut self) -> Self {
        self.backup_retention = None;
        self
    }

    /// Build the ProfilesConfig
    ///
    /// If no base directory is set, uses the environment override (when
    /// requested) or the platform config directory.
    pub fn build(self) -> ProfilesConfig {
        let mut paths = match (self.base_dir, self.env_base_dir) {
            (Some(dir), _) => StoragePaths::new(dir),
            (None, Some(from_env)) => from_env,
            (None, None) => StoragePaths::default_location(),
        };
        if let Some(active_file) = self.active_file {
            paths = paths.with_active_file(active_file);
        }

        let storage = if self.pretty_json {
            JsonStorage::new()
        } else {
            JsonStorage::compact()
        };

        ProfilesConfig {
            paths,
            storage,
            backup_retention: self.backup_retention,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::{ACTIVE_CONFIG_FILE, BASE_DIR_ENV};
    use std::path::Path;

    struct FixedEnv(&'static str);

    impl EnvSource for FixedEnv {
        fn var(&self, key: &str) -> std::result::Result<String, std::env::VarError> {
            if key == BASE_DIR_ENV {
                Ok(self.0.to_string())
            } else {
                Err(std::env::VarError::NotPresent)
            }
        }
    }

    #[test]
    fn test_builder_basic() {
        let config = ProfilesConfig::builder().build();

        assert_eq!(config.paths.active_file_name(), ACTIVE_CONFIG_FILE);
        assert_eq!(config.backup_retention, Some(DEFAULT_BACKUP_RETENTION));
        assert!(config.storage.is_pretty());
    }

    #[test]
    fn test_builder_with_options() {
        let config = ProfilesConfig::builder()
            .base_dir("/tmp/omo")
            .active_file("config.json")
            .compact_json()
            .keep_all_backups()
            .build();

        assert_eq!(config.paths.base_dir(), Path::new("/tmp/omo"));
        assert_eq!(config.paths.active_file_name(), "config.json");
        assert!(!config.storage.is_pretty());
        assert_eq!(config.backup_retention, None);
    }

    #[test]
    fn test_explicit_base_dir_beats_env() {
        let config = ProfilesConfig::builder()
            .from_env(&FixedEnv("/from/env"))
            .base_dir("/explicit")
            .build();
        assert_eq!(config.paths.base_dir(), Path::new("/explicit"));

        let config = ProfilesConfig::builder()
            .from_env(&FixedEnv("/from/env"))
            .build();
        assert_eq!(config.paths.base_dir(), Path::new("/from/env"));
    }

    #[test]
    fn test_reset_base_dir() {
        let config = ProfilesConfig::builder()
            .base_dir("/tmp/omo")
            .reset_base_dir()
            .build();
        assert_eq!(config.paths, StoragePaths::default_location());
    }
}
