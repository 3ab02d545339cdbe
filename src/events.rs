//! Profile change notifications

use std::path::PathBuf;
use std::sync::Arc;

/// Events emitted when profiles or backups change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileEvent {
    /// New profile was created (explicitly or from the active config)
    Created {
        /// Name of the created profile
        name: String,
    },
    /// Profile was deleted
    Deleted {
        /// Name of the deleted profile
        name: String,
    },
    /// Profile was renamed
    Renamed {
        /// Original name
        from: String,
        /// New name
        to: String,
    },
    /// Profile was duplicated
    Duplicated {
        /// Source profile
        source: String,
        /// New profile name
        target: String,
    },
    /// Profile was imported from a file
    Imported {
        /// Name the profile was stored under
        name: String,
        /// File it was read from
        source: PathBuf,
    },
    /// A profile was written over the active config
    Switched {
        /// Profile matched by the previous active config, if any
        from: Option<String>,
        /// New active profile
        to: String,
    },
    /// The active config was replaced from a backup
    Restored {
        /// Backup that was restored
        backup: PathBuf,
    },
    /// A backup of the active config was taken
    BackupCreated {
        /// Path of the new backup
        path: PathBuf,
    },
    /// Old backups were removed by retention
    BackupsPruned {
        /// Number of files deleted
        removed: usize,
    },
}

/// Type alias for profile event callback
pub type ProfileEventCallback = Arc<dyn Fn(&ProfileEvent) + Send + Sync>;
