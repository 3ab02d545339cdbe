//! Common test utilities for omo-profiles integration tests
//!
//! Provides an isolated base directory per test and helpers for writing the
//! active config and raw backup files.

#![allow(dead_code)]

use omo_profiles::{Config, ProfileManager, StoragePaths};
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test fixture with its own base directory and manager
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub manager: ProfileManager,
}

impl TestFixture {
    /// Fixture with default retention
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let manager = ProfileManager::builder().base_dir(temp_dir.path()).build();
        Self { temp_dir, manager }
    }

    /// Fixture that keeps at most `keep` backups after a switch
    pub fn with_retention(keep: usize) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let manager = ProfileManager::builder()
            .base_dir(temp_dir.path())
            .backup_retention(keep)
            .build();
        Self { temp_dir, manager }
    }

    pub fn paths(&self) -> StoragePaths {
        StoragePaths::new(self.temp_dir.path())
    }

    pub fn active_path(&self) -> PathBuf {
        self.paths().active_config_path()
    }

    pub fn profiles_dir(&self) -> PathBuf {
        self.paths().profiles_dir()
    }

    /// Write raw text as the active config
    pub fn write_active(&self, content: &str) {
        std::fs::write(self.active_path(), content).expect("Failed to write active config");
    }

    pub fn read_active(&self) -> String {
        std::fs::read_to_string(self.active_path()).expect("Failed to read active config")
    }

    /// Drop a file into the profiles directory
    pub fn write_profiles_file(&self, filename: &str, content: &str) -> PathBuf {
        std::fs::create_dir_all(self.profiles_dir()).expect("Failed to create profiles dir");
        let path = self.profiles_dir().join(filename);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Create a backup file directly, named for `stamp` (`YYYY-MM-DD-HHMMSS`)
    pub fn write_backup(&self, stamp: &str, content: &str) -> PathBuf {
        self.write_profiles_file(&format!("oh-my-opencode.json.bak.{stamp}"), content)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a Config from a `json!` literal
pub fn config(value: Value) -> Config {
    Config::try_from(value).expect("test config must be a JSON object")
}
