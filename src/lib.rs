//! # omo-profiles
//!
//! Named configuration profiles for `oh-my-opencode.json`: save the current
//! config under a name, switch between saved configs, find out which profile
//! is active, and keep timestamped backups of the file before it is replaced.
//!
//! ## Features
//!
//! - **Profile Store**: one JSON file per profile under `<base>/profiles/`
//! - **Active Detection**: match the live config against stored profiles,
//!   ignoring the volatile `$schema` field
//! - **Backups**: timestamped copies of the active config with retention
//!   pruning (`backup` feature, on by default)
//! - **Name Handling**: strict validation for user-typed names, sanitization
//!   and de-duplication for names derived from filenames
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use omo_profiles::{ActiveState, ProfileManager};
//!
//! # fn example() -> omo_profiles::Result<()> {
//! let manager = ProfileManager::builder()
//!     .base_dir("~/.config/opencode")
//!     .backup_retention(10)
//!     .build();
//!
//! // Keep what is there now, then switch
//! manager.save_current_as("default", false)?;
//! manager.switch_profile("work")?;
//!
//! match manager.status()? {
//!     ActiveState::Matched { name, .. } => println!("active profile: {name}"),
//!     ActiveState::Orphan(_) => println!("active config is not saved as a profile"),
//!     ActiveState::Absent => println!("no active config"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Backups
//!
//! ```rust,no_run
//! use omo_profiles::{BackupManager, StoragePaths};
//!
//! # fn example() -> omo_profiles::Result<()> {
//! let backups = BackupManager::new(StoragePaths::default_location());
//!
//! backups.create_from_active()?;
//! if let Some(latest) = backups.latest()? {
//!     backups.restore(&latest.path)?;
//! }
//! backups.clean(5)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`] facade and are silent unless the host
//! application installs a logger. Every failure is also returned as an
//! [`Error`].

// Core modules
mod document;
mod error;
mod events;
mod manager;
pub mod paths;
pub mod storage;

// Grouped modules
pub mod config;
pub mod profiles;

#[cfg(feature = "backup")]
pub mod backup;

// Re-exports from core
pub use document::{Config, SCHEMA_FIELD};
pub use error::{Error, Result};
pub use events::{ProfileEvent, ProfileEventCallback};
pub use manager::{ProfileManager, ProfileManagerBuilder};
pub use paths::{DefaultEnvSource, EnvSource, StoragePaths};
pub use storage::JsonStorage;

// Re-exports from config
pub use config::{DEFAULT_BACKUP_RETENTION, ProfilesConfig, ProfilesConfigBuilder};

// Re-exports from profiles
pub use profiles::{
    ActiveResolver, ActiveState, Profile, ProfileStore, derive_profile_name,
    sanitize_profile_name, unique_profile_name, validate_profile_name,
};

// Backup re-exports (feature-gated)
#[cfg(feature = "backup")]
pub use backup::{BackupInfo, BackupManager};
