//! Backup types

use crate::error::Result;
use serde::Serialize;
use std::path::PathBuf;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

/// Timestamp layout used in backup filenames (`YYYY-MM-DD-HHMMSS`, UTC)
pub const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]-[hour][minute][second]");

/// A backup found in the profiles directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupInfo {
    /// Full path to the backup file
    pub path: PathBuf,

    /// Creation time parsed from the filename (second resolution)
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,

    /// Bare filename, e.g. `oh-my-opencode.json.bak.2025-01-16-093000`
    pub filename: String,
}

/// Render a timestamp as it appears in backup filenames
pub fn format_timestamp(at: OffsetDateTime) -> Result<String> {
    let at = at.to_offset(time::UtcOffset::UTC);
    Ok(PrimitiveDateTime::new(at.date(), at.time()).format(TIMESTAMP_FORMAT)?)
}

/// Parse a filename timestamp, `None` if it is not exactly `YYYY-MM-DD-HHMMSS`
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    PrimitiveDateTime::parse(raw, TIMESTAMP_FORMAT)
        .ok()
        .map(PrimitiveDateTime::assume_utc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_format_timestamp() {
        let at = datetime!(2025-01-16 09:05:07 UTC);
        assert_eq!(format_timestamp(at).unwrap(), "2025-01-16-090507");
    }

    #[test]
    fn test_format_converts_to_utc() {
        let at = datetime!(2025-01-16 11:05:07 +2);
        assert_eq!(format_timestamp(at).unwrap(), "2025-01-16-090507");
    }

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(
            parse_timestamp("2025-01-16-090507"),
            Some(datetime!(2025-01-16 09:05:07 UTC))
        );
        assert_eq!(parse_timestamp("bad"), None);
        assert_eq!(parse_timestamp("2025-01-16"), None);
        assert_eq!(parse_timestamp("2025-13-16-090507"), None);
        assert_eq!(parse_timestamp("2025-01-16-090507-1"), None);
    }
}
