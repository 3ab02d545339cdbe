//! Configuration for the profile manager
//!
//! - `ProfilesConfig` - storage layout, JSON style and backup retention
//! - `ProfilesConfigBuilder` - fluent construction with env/default fallbacks

mod types;

pub use types::{DEFAULT_BACKUP_RETENTION, ProfilesConfig, ProfilesConfigBuilder};
