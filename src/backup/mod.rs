//! Timestamped backups of the active config

mod operations;
mod types;

pub use operations::BackupManager;
pub use types::{BackupInfo, TIMESTAMP_FORMAT, format_timestamp, parse_timestamp};
