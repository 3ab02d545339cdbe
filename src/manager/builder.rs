//! Builder for ProfileManager
//!
//! This module contains [`ProfileManagerBuilder`] which provides a fluent API
//! for creating a [`ProfileManager`](super::ProfileManager).

use crate::config::ProfilesConfigBuilder;
use crate::events::{ProfileEvent, ProfileEventCallback};
use crate::paths::EnvSource;
use std::path::PathBuf;
use std::sync::Arc;

use super::ProfileManager;

/// Builder for creating a [`ProfileManager`] with a fluent API.
///
/// # Example
///
/// ```rust,no_run
/// use omo_profiles::ProfileManager;
///
/// let manager = ProfileManager::builder()
///     .base_dir("~/.config/opencode")
///     .backup_retention(5)
///     .on_event(|event| println!("{event:?}"))
///     .build();
/// ```
pub struct ProfileManagerBuilder {
    config_builder: ProfilesConfigBuilder,
    on_event: Option<ProfileEventCallback>,
}

impl Default for ProfileManagerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileManagerBuilder {
    pub fn new() -> Self {
        Self {
            config_builder: ProfilesConfigBuilder::new(),
            on_event: None,
        }
    }

    /// Set the base directory.
    ///
    /// Supports `~` expansion for home directory.
    pub fn base_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_builder = self.config_builder.base_dir(path);
        self
    }

    /// Drop an explicit base directory and use the platform default.
    pub fn reset_base_dir(mut self) -> Self {
        self.config_builder = self.config_builder.reset_base_dir();
        self
    }

    /// Honour `OMO_PROFILES_BASE_DIR` when no base directory is set.
    pub fn from_env(mut self, env: &dyn EnvSource) -> Self {
        self.config_builder = self.config_builder.from_env(env);
        self
    }

    /// Set the active config filename (default: "oh-my-opencode.json").
    pub fn active_file(mut self, filename: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.active_file(filename);
        self
    }

    /// Use compact JSON (no pretty printing).
    pub fn compact_json(mut self) -> Self {
        self.config_builder = self.config_builder.compact_json();
        self
    }

    /// Keep at most `keep` backups after each switch.
    pub fn backup_retention(mut self, keep: usize) -> Self {
        self.config_builder = self.config_builder.backup_retention(keep);
        self
    }

    /// Never prune backups automatically.
    pub fn keep_all_backups(mut self) -> Self {
        self.config_builder = self.config_builder.keep_all_backups();
        self
    }

    /// Register a callback for [`ProfileEvent`]s.
    pub fn on_event<F>(mut self, callback: F) -> Self
    where
        F: Fn(&ProfileEvent) + Send + Sync + 'static,
    {
        self.on_event = Some(Arc::new(callback));
        self
    }

    /// Build the [`ProfileManager`].
    pub fn build(self) -> ProfileManager {
        let mut manager = ProfileManager::new(self.config_builder.build());
        manager.on_event = self.on_event;
        manager
    }
}
