//! Error types for omo-profiles

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for omo-profiles operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for omo-profiles
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory '{path}': {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read directory '{path}': {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to delete file '{path}': {source}")]
    FileDelete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to parse '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to format backup timestamp: {0}")]
    Timestamp(#[from] time::error::Format),

    // -------------------------------------------------------------------------
    // Profile Errors
    // -------------------------------------------------------------------------
    #[error("Profile '{0}' not found")]
    ProfileNotFound(String),

    #[error("Profile '{0}' already exists")]
    ProfileAlreadyExists(String),

    #[error("Profile name cannot be empty")]
    EmptyProfileName,

    #[error(
        "Invalid profile name '{name}': '{character}' is not allowed (use letters, digits, '_' or '-')"
    )]
    InvalidProfileName { name: String, character: char },

    // -------------------------------------------------------------------------
    // Backup Errors
    // -------------------------------------------------------------------------
    #[error("Nothing to back up: '{0}' does not exist")]
    SourceNotFound(PathBuf),

    #[error("Backup not found: {0}")]
    BackupNotFound(PathBuf),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Check if this is a "not found" type error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::ProfileNotFound(_) | Error::SourceNotFound(_) | Error::BackupNotFound(_)
        )
    }

    /// Check if this error came from name validation
    #[must_use]
    pub fn is_invalid_name(&self) -> bool {
        matches!(
            self,
            Error::EmptyProfileName | Error::InvalidProfileName { .. }
        )
    }

    /// Check if this is a filesystem failure
    #[must_use]
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            Error::FileRead { .. }
                | Error::FileWrite { .. }
                | Error::DirectoryCreate { .. }
                | Error::DirectoryRead { .. }
                | Error::FileDelete { .. }
        )
    }
}

// =============================================================================
// Filesystem Helper Functions
// =============================================================================
// These reduce repetitive map_err patterns across the store and backup modules.

/// Create a directory (and parents) with proper error handling
pub(crate) fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| Error::DirectoryCreate {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Delete a file with proper error handling
#[cfg_attr(not(feature = "backup"), allow(dead_code))]
pub(crate) fn remove_file(path: &Path) -> Result<()> {
    std::fs::remove_file(path).map_err(|e| Error::FileDelete {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read directory entries, treating a missing directory as empty
pub(crate) fn read_dir_if_exists(path: &Path) -> Result<Option<std::fs::ReadDir>> {
    match std::fs::read_dir(path) {
        Ok(entries) => Ok(Some(entries)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::DirectoryRead {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
