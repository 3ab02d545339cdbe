//! Active config resolution
//!
//! Works out which stored profile (if any) the live config file corresponds to,
//! and writes profiles over it.

use crate::document::Config;
use crate::error::{Error, Result};
use crate::profiles::names::validate_profile_name;
use crate::profiles::store::{Profile, ProfileStore};
use crate::storage::JsonStorage;

use log::{debug, info, warn};
use std::path::PathBuf;

/// What the active config file currently is
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveState {
    /// No active config file exists
    Absent,
    /// The active config equals a stored profile under normalization
    Matched {
        /// Name of the first matching profile in store listing order
        name: String,
        config: Config,
    },
    /// The active config exists but matches no stored profile
    Orphan(Config),
}

impl ActiveState {
    /// Name of the matched profile, if any
    pub fn profile_name(&self) -> Option<&str> {
        match self {
            ActiveState::Matched { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    /// The active document, if one exists
    pub fn config(&self) -> Option<&Config> {
        match self {
            ActiveState::Absent => None,
            ActiveState::Matched { config, .. } | ActiveState::Orphan(config) => Some(config),
        }
    }

    pub fn is_orphan(&self) -> bool {
        matches!(self, ActiveState::Orphan(_))
    }
}

/// Reads, classifies and replaces the active config file
#[derive(Debug, Clone)]
pub struct ActiveResolver {
    store: ProfileStore,
    storage: JsonStorage,
}

impl ActiveResolver {
    pub fn new(store: ProfileStore, storage: JsonStorage) -> Self {
        Self { store, storage }
    }

    fn active_path(&self) -> PathBuf {
        self.store.paths().active_config_path()
    }

    /// Parse the active config, `None` when the file does not exist
    pub fn read_active(&self) -> Result<Option<Config>> {
        let path = self.active_path();
        match self.storage.read::<Config>(&path) {
            Ok(config) => Ok(Some(config)),
            Err(Error::FileRead { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Classify the active config against the stored profiles
    ///
    /// Profiles are scanned in [`ProfileStore::list`] order and the first one
    /// whose normalized bytes equal the active config's wins. Profiles that
    /// cannot be loaded are skipped.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] if the active file exists but is not a JSON object.
    pub fn get_active(&self) -> Result<ActiveState> {
        let Some(active) = self.read_active()? else {
            return Ok(ActiveState::Absent);
        };

        for name in self.store.list()? {
            let candidate = match self.store.load(&name) {
                Ok(profile) => profile,
                Err(e) => {
                    warn!("Skipping unreadable profile '{name}': {e}");
                    continue;
                }
            };

            if candidate.config.same_as(&active) {
                debug!("Active config matches profile '{name}'");
                return Ok(ActiveState::Matched {
                    name,
                    config: active,
                });
            }
        }

        debug!("Active config matches no stored profile");
        Ok(ActiveState::Orphan(active))
    }

    /// Overwrite the active config with profile `name`
    pub fn set_active(&self, name: &str) -> Result<()> {
        let profile = self.store.load(name)?;
        self.write_active(&profile.config)?;
        info!("Activated profile '{name}'");
        Ok(())
    }

    /// Write a document over the active config file
    pub(crate) fn write_active(&self, config: &Config) -> Result<()> {
        self.store.paths().ensure_dirs()?;
        self.storage.write(&self.active_path(), config)
    }

    /// Save the current active config as profile `name`
    ///
    /// # Errors
    ///
    /// [`Error::SourceNotFound`] when there is no active config,
    /// [`Error::ProfileAlreadyExists`] when `name` is taken and `overwrite` is
    /// false.
    pub fn capture(&self, name: &str, overwrite: bool) -> Result<Profile> {
        validate_profile_name(name)?;

        if !overwrite && self.store.exists(name) {
            return Err(Error::ProfileAlreadyExists(name.to_string()));
        }

        let config = self
            .read_active()?
            .ok_or_else(|| Error::SourceNotFound(self.active_path()))?;

        let profile = Profile::new(name, config);
        self.store.save(&profile)?;
        info!("Saved active config as profile '{name}'");
        Ok(profile)
    }
}

// =============================================================================
// Tests
// =============================================================================
