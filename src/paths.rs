//! Storage locations for profiles, backups and the active config
//!
//! All path construction goes through [`StoragePaths`]. The value is passed
//! explicitly to every component, so an isolated run (tests, sandboxes) only
//! needs a `StoragePaths` pointing at a different root.

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the base directory
pub const BASE_DIR_ENV: &str = "OMO_PROFILES_BASE_DIR";

/// Default filename of the active config inside the base directory
pub const ACTIVE_CONFIG_FILE: &str = "oh-my-opencode.json";

/// Directory name holding saved profiles and backups
pub const PROFILES_DIR: &str = "profiles";

/// Marker between the active config filename and the backup timestamp
pub const BACKUP_MARKER: &str = ".bak.";

/// Source of environment variables
///
/// Abstracted so tests can inject values without touching the process
/// environment.
pub trait EnvSource: Send + Sync {
    /// Look up a variable
    fn var(&self, key: &str) -> std::result::Result<String, std::env::VarError>;
}

/// Reads from the real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEnvSource;

impl EnvSource for DefaultEnvSource {
    fn var(&self, key: &str) -> std::result::Result<String, std::env::VarError> {
        std::env::var(key)
    }
}

/// Resolved storage layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    base_dir: PathBuf,
    active_file: String,
}

impl StoragePaths {
    /// Layout rooted at `base_dir` with the default active config filename
    ///
    /// Supports `~` expansion for the home directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: expand_home(base_dir.into()),
            active_file: ACTIVE_CONFIG_FILE.to_string(),
        }
    }

    /// Layout at the platform default location (`<config dir>/opencode`)
    pub fn default_location() -> Self {
        Self::new(default_base_dir())
    }

    /// Default location unless [`BASE_DIR_ENV`] is set to a non-empty value
    pub fn from_env(env: &dyn EnvSource) -> Self {
        match env.var(BASE_DIR_ENV) {
            Ok(dir) if !dir.trim().is_empty() => Self::new(dir),
            _ => Self::default_location(),
        }
    }

    /// Use a different active config filename
    #[must_use]
    pub fn with_active_file(mut self, filename: impl Into<String>) -> Self {
        self.active_file = filename.into();
        self
    }

    /// Point at a different root, keeping the active filename
    #[must_use]
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = expand_home(base_dir.into());
        self
    }

    /// Go back to the platform default root, keeping the active filename
    #[must_use]
    pub fn reset_base_dir(self) -> Self {
        self.with_base_dir(default_base_dir())
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn profiles_dir(&self) -> PathBuf {
        self.base_dir.join(PROFILES_DIR)
    }

    pub fn active_config_path(&self) -> PathBuf {
        self.base_dir.join(&self.active_file)
    }

    /// Filename of the active config (also the backup filename prefix stem)
    pub fn active_file_name(&self) -> &str {
        &self.active_file
    }

    /// Path of the stored profile `name`
    pub fn profile_path(&self, name: &str) -> PathBuf {
        self.profiles_dir().join(format!("{name}.json"))
    }

    /// Filename prefix shared by every backup, e.g. `oh-my-opencode.json.bak.`
    pub fn backup_prefix(&self) -> String {
        format!("{}{}", self.active_file, BACKUP_MARKER)
    }

    /// Create the base and profiles directories if missing
    ///
    /// Fails with [`crate::Error::DirectoryCreate`] when blocked by permissions
    /// or by a regular file occupying one of the paths.
    pub fn ensure_dirs(&self) -> Result<()> {
        crate::error::create_dir(&self.profiles_dir())
    }
}

impl Default for StoragePaths {
    fn default() -> Self {
        Self::default_location()
    }
}

fn default_base_dir() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("opencode"))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn expand_home(path: PathBuf) -> PathBuf {
    if path.starts_with("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(path.strip_prefix("~").unwrap_or(&path));
        }
    }
    path
}
