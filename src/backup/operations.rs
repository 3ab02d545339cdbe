//! Backup creation, listing, restore and retention

use super::types::{BackupInfo, format_timestamp, parse_timestamp};
use crate::error::{Error, Result};
use crate::paths::StoragePaths;
use crate::storage::write_atomic;

use log::{debug, info};
use regex::Regex;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

/// Manages timestamped copies of the active config
///
/// Backups live next to the profiles as
/// `<profiles_dir>/<active file>.bak.<YYYY-MM-DD-HHMMSS>`. Timestamps have
/// second resolution: two backups taken within the same second share a
/// filename and the later one replaces the earlier. This also applies across
/// callers, e.g. a switch followed by a restore in the same second.
#[derive(Debug, Clone)]
pub struct BackupManager {
    paths: StoragePaths,
}

impl BackupManager {
    /// Create a new backup manager
    pub fn new(paths: StoragePaths) -> Self {
        Self { paths }
    }

    /// Directory holding the backups
    pub fn backup_dir(&self) -> PathBuf {
        self.paths.profiles_dir()
    }

    /// Path a backup taken at `at` would have
    pub fn backup_path_for(&self, at: OffsetDateTime) -> Result<PathBuf> {
        Ok(self
            .backup_dir()
            .join(format!("{}{}", self.paths.backup_prefix(), format_timestamp(at)?)))
    }

    fn pattern(&self) -> Result<Regex> {
        let pattern = format!(
            r"^{}(\d{{4}}-\d{{2}}-\d{{2}}-\d{{6}})$",
            regex::escape(&self.paths.backup_prefix())
        );
        Regex::new(&pattern).map_err(|e| Error::Config(format!("Invalid backup pattern: {e}")))
    }

    /// Snapshot `source` with the current time
    ///
    /// # Errors
    ///
    /// [`Error::SourceNotFound`] if `source` does not exist.
    pub fn create(&self, source: &Path) -> Result<PathBuf> {
        self.create_at(source, OffsetDateTime::now_utc())
    }

    /// Snapshot the configured active config file
    pub fn create_from_active(&self) -> Result<PathBuf> {
        self.create(&self.paths.active_config_path())
    }

    /// Snapshot `source` under the timestamp `at`
    pub fn create_at(&self, source: &Path, at: OffsetDateTime) -> Result<PathBuf> {
        let contents = std::fs::read(source).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::SourceNotFound(source.to_path_buf())
            } else {
                Error::FileRead {
                    path: source.to_path_buf(),
                    source: e,
                }
            }
        })?;

        self.paths.ensure_dirs()?;
        let output_path = self.backup_path_for(at)?;
        write_atomic(&output_path, &contents)?;

        info!("Backup created: {}", output_path.display());
        Ok(output_path)
    }

    /// All backups, most recent first
    ///
    /// Only regular files count. Entries without the exact prefix or with an
    /// unparseable timestamp are ignored. A missing directory yields an empty
    /// list.
    pub fn list(&self) -> Result<Vec<BackupInfo>> {
        let dir = self.backup_dir();
        let Some(entries) = crate::error::read_dir_if_exists(&dir)? else {
            return Ok(Vec::new());
        };

        let pattern = self.pattern()?;
        let mut backups = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| Error::DirectoryRead {
                path: dir.clone(),
                source: e,
            })?;

            let file_name = entry.file_name();
            let Some(filename) = file_name.to_str() else {
                continue;
            };

            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            if !is_file {
                debug!("Ignoring non-file entry: {filename}");
                continue;
            }

            let timestamp = pattern
                .captures(filename)
                .and_then(|caps| caps.get(1))
                .and_then(|m| parse_timestamp(m.as_str()));

            match timestamp {
                Some(timestamp) => backups.push(BackupInfo {
                    path: entry.path(),
                    timestamp,
                    filename: filename.to_string(),
                }),
                None => debug!("Ignoring non-backup file: {filename}"),
            }
        }

        backups.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(backups)
    }

    /// Most recent backup, if any
    pub fn latest(&self) -> Result<Option<BackupInfo>> {
        Ok(self.list()?.into_iter().next())
    }

    /// Copy a backup's bytes verbatim over the active config
    pub fn restore(&self, backup: &Path) -> Result<()> {
        let contents = std::fs::read(backup).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::BackupNotFound(backup.to_path_buf())
            } else {
                Error::FileRead {
                    path: backup.to_path_buf(),
                    source: e,
                }
            }
        })?;

        write_atomic(&self.paths.active_config_path(), &contents)?;
        info!("Restored active config from {}", backup.display());
        Ok(())
    }

    /// Remove a single backup file
    pub fn delete(&self, backup: &Path) -> Result<()> {
        std::fs::remove_file(backup).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::BackupNotFound(backup.to_path_buf())
            } else {
                Error::FileDelete {
                    path: backup.to_path_buf(),
                    source: e,
                }
            }
        })
    }

    /// Keep the `keep_last` most recent backups and delete the rest
    ///
    /// Returns how many files were deleted. The first failed deletion aborts
    /// the pass; backups removed before it stay removed.
    pub fn clean(&self, keep_last: usize) -> Result<usize> {
        prune(&self.list()?, keep_last, crate::error::remove_file)
    }
}

/// Remove `backups[keep_last..]` in order, stopping at the first failure
fn prune(
    backups: &[BackupInfo],
    keep_last: usize,
    remove: impl Fn(&Path) -> Result<()>,
) -> Result<usize> {
    if backups.len() <= keep_last {
        return Ok(0);
    }

    let mut removed = 0;
    for backup in &backups[keep_last..] {
        remove(&backup.path)?;
        debug!("Pruned backup {}", backup.filename);
        removed += 1;
    }

    info!("Pruned {removed} backup(s), kept {keep_last}");
    Ok(removed)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use time::macros::datetime;

    fn setup() -> (tempfile::TempDir, StoragePaths, BackupManager) {
        let dir = tempdir().unwrap();
        let paths = StoragePaths::new(dir.path());
        let manager = BackupManager::new(paths.clone());
        (dir, paths, manager)
    }

    #[test]
    fn test_create_requires_source() {
        let (_dir, paths, manager) = setup();
        assert!(matches!(
            manager.create(&paths.active_config_path()),
            Err(Error::SourceNotFound(_))
        ));
        assert!(matches!(
            manager.create_from_active(),
            Err(Error::SourceNotFound(_))
        ));
    }

    #[test]
    fn test_create_copies_bytes() {
        let (_dir, paths, manager) = setup();
        let raw = b"{ \"keep\":   \"formatting\" }";
        std::fs::write(paths.active_config_path(), raw).unwrap();

        let path = manager
            .create_at(&paths.active_config_path(), datetime!(2025-01-16 10:00:00 UTC))
            .unwrap();

        assert_eq!(
            path,
            paths
                .profiles_dir()
                .join("oh-my-opencode.json.bak.2025-01-16-100000")
        );
        assert_eq!(std::fs::read(&path).unwrap(), raw);
    }

    #[test]
    fn test_same_second_overwrites() {
        let (_dir, paths, manager) = setup();
        let at = datetime!(2025-01-16 10:00:00 UTC);
        std::fs::write(paths.active_config_path(), "first").unwrap();
        let first = manager.create_at(&paths.active_config_path(), at).unwrap();
        std::fs::write(paths.active_config_path(), "second").unwrap();
        let second = manager.create_at(&paths.active_config_path(), at).unwrap();

        assert_eq!(first, second);
        assert_eq!(manager.list().unwrap().len(), 1);
        assert_eq!(std::fs::read_to_string(second).unwrap(), "second");
    }

    #[test]
    fn test_list_missing_dir() {
        let (_dir, _paths, manager) = setup();
        assert!(manager.list().unwrap().is_empty());
        assert!(manager.latest().unwrap().is_none());
    }

    #[test]
    fn test_list_skips_foreign_files() {
        let (_dir, paths, manager) = setup();
        let profiles = paths.profiles_dir();
        std::fs::create_dir_all(&profiles).unwrap();
        std::fs::write(profiles.join("oh-my-opencode.json.bak.bad"), "x").unwrap();
        std::fs::write(profiles.join("other-file.bak.2025-01-16"), "x").unwrap();
        std::fs::write(profiles.join("dev.json"), "{}").unwrap();
        std::fs::write(
            profiles.join("oh-my-opencode.json.bak.2025-01-16-120000"),
            "x",
        )
        .unwrap();

        let backups = manager.list().unwrap();
        assert_eq!(backups.len(), 1);
        assert_eq!(
            backups[0].filename,
            "oh-my-opencode.json.bak.2025-01-16-120000"
        );
        assert_eq!(backups[0].timestamp, datetime!(2025-01-16 12:00:00 UTC));
    }

    #[test]
    fn test_restore() {
        let (_dir, paths, manager) = setup();
        std::fs::write(paths.active_config_path(), "original").unwrap();
        let backup = manager.create_from_active().unwrap();
        std::fs::write(paths.active_config_path(), "changed").unwrap();

        manager.restore(&backup).unwrap();
        assert_eq!(
            std::fs::read_to_string(paths.active_config_path()).unwrap(),
            "original"
        );
    }

    #[test]
    fn test_restore_missing_backup() {
        let (dir, _paths, manager) = setup();
        let result = manager.restore(&dir.path().join("nope"));
        assert!(matches!(result, Err(Error::BackupNotFound(_))));
    }

    #[test]
    fn test_delete_single() {
        let (_dir, paths, manager) = setup();
        std::fs::write(paths.active_config_path(), "{}").unwrap();
        let backup = manager.create_from_active().unwrap();

        manager.delete(&backup).unwrap();
        assert!(manager.list().unwrap().is_empty());
        assert!(matches!(
            manager.delete(&backup),
            Err(Error::BackupNotFound(_))
        ));
    }

    #[test]
    fn test_clean_noop_when_under_limit() {
        let (_dir, paths, manager) = setup();
        std::fs::write(paths.active_config_path(), "{}").unwrap();
        manager.create_from_active().unwrap();

        assert_eq!(manager.clean(1).unwrap(), 0);
        assert_eq!(manager.clean(5).unwrap(), 0);
        assert_eq!(manager.list().unwrap().len(), 1);
    }

    #[test]
    fn test_backup_path_for() {
        let (_dir, paths, manager) = setup();
        let path = manager
            .backup_path_for(datetime!(2025-01-16 11:30:00 +2))
            .unwrap();
        assert_eq!(
            path,
            paths
                .profiles_dir()
                .join("oh-my-opencode.json.bak.2025-01-16-093000")
        );
    }

    #[test]
    fn test_list_skips_directories() {
        let (_dir, paths, manager) = setup();
        let profiles = paths.profiles_dir();
        std::fs::create_dir_all(profiles.join("oh-my-opencode.json.bak.2025-01-11-000000"))
            .unwrap();
        for stamp in ["2025-01-10-000000", "2025-01-12-000000", "2025-01-13-000000"] {
            std::fs::write(profiles.join(format!("oh-my-opencode.json.bak.{stamp}")), "{}")
                .unwrap();
        }

        let backups = manager.list().unwrap();
        assert_eq!(backups.len(), 3);
        assert!(backups.iter().all(|b| b.path.is_file()));

        assert_eq!(manager.clean(1).unwrap(), 2);
        let remaining = manager.list().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(
            remaining[0].filename,
            "oh-my-opencode.json.bak.2025-01-13-000000"
        );
        assert!(
            profiles
                .join("oh-my-opencode.json.bak.2025-01-11-000000")
                .is_dir()
        );
    }

    #[test]
    fn test_prune_stops_at_first_failed_delete() {
        let (_dir, paths, manager) = setup();
        let profiles = paths.profiles_dir();
        std::fs::create_dir_all(&profiles).unwrap();
        for day in 1..=5 {
            std::fs::write(
                profiles.join(format!("oh-my-opencode.json.bak.2025-01-0{day}-000000")),
                "{}",
            )
            .unwrap();
        }
        let backups = manager.list().unwrap();
        let stuck = backups[2].path.clone();

        let result = prune(&backups, 1, |path| {
            if path == stuck {
                Err(Error::FileDelete {
                    path: path.to_path_buf(),
                    source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
                })
            } else {
                crate::error::remove_file(path)
            }
        });

        assert!(matches!(result, Err(Error::FileDelete { ref path, .. }) if *path == stuck));

        let remaining: Vec<String> = manager
            .list()
            .unwrap()
            .into_iter()
            .map(|b| b.filename)
            .collect();
        // Newest kept, the one after it deleted, everything from the failure on untouched
        assert_eq!(
            remaining,
            vec![
                "oh-my-opencode.json.bak.2025-01-05-000000".to_string(),
                "oh-my-opencode.json.bak.2025-01-03-000000".to_string(),
                "oh-my-opencode.json.bak.2025-01-02-000000".to_string(),
                "oh-my-opencode.json.bak.2025-01-01-000000".to_string(),
            ]
        );
    }
}
