//! High-level profile workflows
//!
//! [`ProfileManager`] ties the store, the active-config resolver and the backup
//! manager together into the operations a command-line front end needs, in the
//! order they must happen (back up, then overwrite, then prune).

mod builder;

pub use builder::ProfileManagerBuilder;

use crate::config::ProfilesConfig;
use crate::document::Config;
use crate::error::{Error, Result};
use crate::events::{ProfileEvent, ProfileEventCallback};
use crate::profiles::{
    ActiveResolver, ActiveState, Profile, ProfileStore, derive_profile_name,
    validate_profile_name,
};

#[cfg(feature = "backup")]
use crate::backup::{BackupInfo, BackupManager};

#[cfg(feature = "backup")]
use log::{debug, warn};
use log::info;
use std::path::{Path, PathBuf};

/// Entry point for managing oh-my-opencode profiles
pub struct ProfileManager {
    config: ProfilesConfig,
    store: ProfileStore,
    resolver: ActiveResolver,
    #[cfg(feature = "backup")]
    backups: BackupManager,
    pub(crate) on_event: Option<ProfileEventCallback>,
}

impl std::fmt::Debug for ProfileManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileManager")
            .field("config", &self.config)
            .field("on_event", &self.on_event.as_ref().map(|_| "Some(Fn)"))
            .finish()
    }
}

impl ProfileManager {
    /// Create a manager from an existing configuration
    pub fn new(config: ProfilesConfig) -> Self {
        let store = ProfileStore::new(config.paths.clone(), config.storage.clone());
        let resolver = ActiveResolver::new(store.clone(), config.storage.clone());
        Self {
            #[cfg(feature = "backup")]
            backups: BackupManager::new(config.paths.clone()),
            store,
            resolver,
            config,
            on_event: None,
        }
    }

    /// Start building a manager
    pub fn builder() -> ProfileManagerBuilder {
        ProfileManagerBuilder::new()
    }

    pub fn config(&self) -> &ProfilesConfig {
        &self.config
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    pub fn resolver(&self) -> &ActiveResolver {
        &self.resolver
    }

    #[cfg(feature = "backup")]
    pub fn backups(&self) -> &BackupManager {
        &self.backups
    }

    fn emit(&self, event: ProfileEvent) {
        if let Some(callback) = self.on_event.as_ref() {
            callback(&event);
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Classify the active config (absent / matched / orphan)
    pub fn status(&self) -> Result<ActiveState> {
        self.resolver.get_active()
    }

    /// Stored profile names, alphabetically
    pub fn list_profiles(&self) -> Result<Vec<String>> {
        self.store.list_sorted()
    }

    pub fn load_profile(&self, name: &str) -> Result<Profile> {
        self.store.load(name)
    }

    /// Backups, most recent first
    #[cfg(feature = "backup")]
    pub fn list_backups(&self) -> Result<Vec<BackupInfo>> {
        self.backups.list()
    }

    // =========================================================================
    // Profile lifecycle
    // =========================================================================

    /// Store `config` as a new profile
    pub fn create_profile(&self, name: &str, config: Config) -> Result<Profile> {
        validate_profile_name(name)?;
        if self.store.exists(name) {
            return Err(Error::ProfileAlreadyExists(name.to_string()));
        }

        let profile = Profile::new(name, config);
        self.store.save(&profile)?;

        info!("Created profile '{name}'");
        self.emit(ProfileEvent::Created {
            name: name.to_string(),
        });
        Ok(profile)
    }

    /// Store the current active config as profile `name`
    pub fn save_current_as(&self, name: &str, overwrite: bool) -> Result<Profile> {
        let profile = self.resolver.capture(name, overwrite)?;
        self.emit(ProfileEvent::Created {
            name: name.to_string(),
        });
        Ok(profile)
    }

    pub fn delete_profile(&self, name: &str) -> Result<()> {
        self.store.delete(name)?;
        self.emit(ProfileEvent::Deleted {
            name: name.to_string(),
        });
        Ok(())
    }

    pub fn rename_profile(&self, from: &str, to: &str) -> Result<()> {
        self.store.rename(from, to)?;
        self.emit(ProfileEvent::Renamed {
            from: from.to_string(),
            to: to.to_string(),
        });
        Ok(())
    }

    pub fn duplicate_profile(&self, source: &str, target: &str) -> Result<Profile> {
        let copy = self.store.duplicate(source, target)?;
        self.emit(ProfileEvent::Duplicated {
            source: source.to_string(),
            target: target.to_string(),
        });
        Ok(copy)
    }

    /// Import a config file as a profile
    ///
    /// An explicit `name` must already be valid. Without one, the name is
    /// derived from the file stem, sanitized and suffixed until unique.
    pub fn import_profile(&self, source: &Path, name: Option<&str>) -> Result<Profile> {
        let name = match name {
            Some(name) => name.to_string(),
            None => {
                let stem = source
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                derive_profile_name(&stem, |candidate| self.store.exists(candidate))?
            }
        };

        let profile = self.store.import(source, &name)?;
        self.emit(ProfileEvent::Imported {
            name,
            source: source.to_path_buf(),
        });
        Ok(profile)
    }

    pub fn export_profile(&self, name: &str, dest: &Path) -> Result<()> {
        self.store.export(name, dest)
    }

    // =========================================================================
    // Switching
    // =========================================================================

    /// Make profile `name` the active config
    ///
    /// The target profile is loaded first so a missing or broken profile leaves
    /// everything untouched. When an active config exists it is backed up
    /// before being overwritten, and old backups are pruned to the configured
    /// retention afterwards. Returns the path of the backup taken, or `None`
    /// when there was nothing to back up or retention already removed it.
    ///
    /// Once the active config has been written the switch counts as done: a
    /// failure while pruning is logged and does not turn into an error.
    pub fn switch_profile(&self, name: &str) -> Result<Option<PathBuf>> {
        let target = self.store.load(name)?;

        let from = self
            .resolver
            .get_active()
            .ok()
            .and_then(|state| state.profile_name().map(str::to_string));

        #[cfg(feature = "backup")]
        let backup = self.backup_active()?;
        #[cfg(not(feature = "backup"))]
        let backup = None;

        self.resolver.write_active(&target.config)?;
        info!("Switched to profile '{name}'");

        #[cfg(feature = "backup")]
        let backup = {
            if let Err(e) = self.prune_backups() {
                warn!("Switched to '{name}' but pruning old backups failed: {e}");
            }
            backup.filter(|path| path.is_file())
        };

        self.emit(ProfileEvent::Switched {
            from,
            to: name.to_string(),
        });
        Ok(backup)
    }

    // =========================================================================
    // Backups
    // =========================================================================

    /// Back up the active config if there is one
    #[cfg(feature = "backup")]
    pub fn backup_active(&self) -> Result<Option<PathBuf>> {
        match self.backups.create_from_active() {
            Ok(path) => {
                self.emit(ProfileEvent::BackupCreated { path: path.clone() });
                Ok(Some(path))
            }
            Err(Error::SourceNotFound(_)) => {
                debug!("No active config to back up");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Apply the configured retention, returning how many backups were removed
    #[cfg(feature = "backup")]
    pub fn prune_backups(&self) -> Result<usize> {
        let Some(keep) = self.config.backup_retention else {
            return Ok(0);
        };

        let removed = self.backups.clean(keep)?;
        if removed > 0 {
            self.emit(ProfileEvent::BackupsPruned { removed });
        }
        Ok(removed)
    }

    /// Replace the active config with a backup
    ///
    /// The current active config is backed up first unless that backup would
    /// land on the very file being restored. Backup names have second
    /// resolution, so a safety backup taken in the same second as another
    /// backup (e.g. one a switch just made) replaces that backup.
    #[cfg(feature = "backup")]
    pub fn restore_backup(&self, backup: &Path) -> Result<()> {
        if !backup.exists() {
            return Err(Error::BackupNotFound(backup.to_path_buf()));
        }

        let now = time::OffsetDateTime::now_utc();
        let active = self.config.paths.active_config_path();
        if active.exists() && self.backups.backup_path_for(now)? != backup {
            let path = self.backups.create_at(&active, now)?;
            self.emit(ProfileEvent::BackupCreated { path });
        }

        self.backups.restore(backup)?;
        self.emit(ProfileEvent::Restored {
            backup: backup.to_path_buf(),
        });
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
