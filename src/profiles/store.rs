//! Profile store: one JSON document per profile in the profiles directory

use crate::document::Config;
use crate::error::{Error, Result};
use crate::paths::StoragePaths;
use crate::profiles::names::validate_profile_name;
use crate::storage::JsonStorage;

use log::{debug, info};
use std::path::Path;

/// A named configuration document
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub name: String,
    pub config: Config,
}

impl Profile {
    pub fn new(name: impl Into<String>, config: Config) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }
}

/// Load/save/list/delete over `<profiles_dir>/<name>.json`
///
/// Every name is validated before it becomes a path, so a name can never
/// reach outside the profiles directory. [`ProfileStore::exists`] reports
/// invalid names as absent.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    paths: StoragePaths,
    storage: JsonStorage,
}

impl ProfileStore {
    pub fn new(paths: StoragePaths, storage: JsonStorage) -> Self {
        Self { paths, storage }
    }

    pub fn paths(&self) -> &StoragePaths {
        &self.paths
    }

    /// Read and parse a stored profile
    ///
    /// # Errors
    ///
    /// [`Error::ProfileNotFound`] if the file is absent, [`Error::Parse`] if it
    /// is not a JSON object, a name error if `name` is not a valid profile name.
    pub fn load(&self, name: &str) -> Result<Profile> {
        validate_profile_name(name)?;
        let path = self.paths.profile_path(name);
        let config: Config = self.storage.read(&path).map_err(|e| match e {
            Error::FileRead { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
                Error::ProfileNotFound(name.to_string())
            }
            other => other,
        })?;
        Ok(Profile::new(name, config))
    }

    /// Write a profile, replacing any existing one of the same name
    pub fn save(&self, profile: &Profile) -> Result<()> {
        validate_profile_name(&profile.name)?;
        self.paths.ensure_dirs()?;
        let path = self.paths.profile_path(&profile.name);
        self.storage.write(&path, &profile.config)?;
        debug!("Saved profile '{}' to {}", profile.name, path.display());
        Ok(())
    }

    /// Remove a stored profile
    pub fn delete(&self, name: &str) -> Result<()> {
        validate_profile_name(name)?;
        let path = self.paths.profile_path(name);
        std::fs::remove_file(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::ProfileNotFound(name.to_string())
            } else {
                Error::FileDelete { path, source: e }
            }
        })?;
        info!("Deleted profile '{name}'");
        Ok(())
    }

    /// Names of all stored profiles, in directory enumeration order
    ///
    /// The order is whatever the filesystem yields and must not be relied on.
    /// A missing profiles directory yields an empty list.
    pub fn list(&self) -> Result<Vec<String>> {
        let dir = self.paths.profiles_dir();
        let Some(entries) = crate::error::read_dir_if_exists(&dir)? else {
            return Ok(Vec::new());
        };

        let ext = format!(".{}", self.storage.extension());
        let mut names = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| Error::DirectoryRead {
                path: dir.clone(),
                source: e,
            })?;

            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            if !is_file {
                continue;
            }

            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if let Some(name) = file_name.strip_suffix(&ext) {
                names.push(name.to_string());
            }
        }

        Ok(names)
    }

    /// Names of all stored profiles, alphabetically
    pub fn list_sorted(&self) -> Result<Vec<String>> {
        let mut names = self.list()?;
        names.sort();
        Ok(names)
    }

    /// Whether a profile file is present
    pub fn exists(&self, name: &str) -> bool {
        validate_profile_name(name).is_ok()
            && std::fs::metadata(self.paths.profile_path(name)).is_ok()
    }

    /// Rename a profile
    pub fn rename(&self, from: &str, to: &str) -> Result<()> {
        validate_profile_name(from)?;
        validate_profile_name(to)?;

        if !self.exists(from) {
            return Err(Error::ProfileNotFound(from.to_string()));
        }
        if self.exists(to) {
            return Err(Error::ProfileAlreadyExists(to.to_string()));
        }

        let from_path = self.paths.profile_path(from);
        let to_path = self.paths.profile_path(to);
        std::fs::rename(&from_path, &to_path).map_err(|e| Error::FileWrite {
            path: to_path,
            source: e,
        })?;

        info!("Renamed profile '{from}' -> '{to}'");
        Ok(())
    }

    /// Copy a profile under a new name
    pub fn duplicate(&self, source: &str, target: &str) -> Result<Profile> {
        validate_profile_name(target)?;

        if self.exists(target) {
            return Err(Error::ProfileAlreadyExists(target.to_string()));
        }

        let copy = Profile::new(target, self.load(source)?.config);
        self.save(&copy)?;

        info!("Duplicated profile '{source}' -> '{target}'");
        Ok(copy)
    }

    /// Write a stored profile to an arbitrary location
    pub fn export(&self, name: &str, dest: &Path) -> Result<()> {
        let profile = self.load(name)?;
        self.storage.write(dest, &profile.config)?;
        info!("Exported profile '{name}' to {}", dest.display());
        Ok(())
    }

    /// Store the document at `source` as profile `name`
    ///
    /// Schema validation of the imported document is the caller's job.
    ///
    /// # Errors
    ///
    /// [`Error::ProfileAlreadyExists`] rather than overwriting, [`Error::Parse`]
    /// if the file is not a JSON object.
    pub fn import(&self, source: &Path, name: &str) -> Result<Profile> {
        validate_profile_name(name)?;

        if self.exists(name) {
            return Err(Error::ProfileAlreadyExists(name.to_string()));
        }

        let config: Config = self.storage.read(source)?;
        let profile = Profile::new(name, config);
        self.save(&profile)?;

        info!("Imported profile '{name}' from {}", source.display());
        Ok(profile)
    }
}

// =============================================================================
// Tests
// =============================================================================
