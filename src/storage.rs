//! JSON document storage with atomic writes

use crate::error::{Error, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::path::Path;

/// JSON storage used for profiles and the active config
///
/// Pretty printing (two-space indentation) is the default so that files written
/// by this crate stay diff-friendly and byte-stable across runs.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    /// Pretty print JSON output
    pretty: bool,
}

impl Default for JsonStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonStorage {
    /// Create a new JSON storage backend with pretty printing enabled
    pub fn new() -> Self {
        Self { pretty: true }
    }

    /// Create a compact JSON storage (no pretty printing)
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// Whether output is indented
    pub fn is_pretty(&self) -> bool {
        self.pretty
    }

    /// File extension used for stored documents
    pub fn extension(&self) -> &'static str {
        "json"
    }

    /// Serialize data to string
    pub fn serialize<T: Serialize>(&self, data: &T) -> Result<String> {
        if self.pretty {
            serde_json::to_string_pretty(data).map_err(Error::from)
        } else {
            serde_json::to_string(data).map_err(Error::from)
        }
    }

    /// Read and deserialize from file
    ///
    /// A missing file surfaces as [`Error::FileRead`] with an
    /// [`std::io::ErrorKind::NotFound`] source so callers can map it to their
    /// own not-found variant.
    pub fn read<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| Error::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Serialize and write to file
    pub fn write<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let content = self.serialize(data)?;
        write_atomic(path, content.as_bytes())
    }
}

/// Write bytes to `path` through a sibling temp file and a rename
///
/// Either the new content is fully in place or an error is returned and the
/// previous file (if any) is left untouched.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        crate::error::create_dir(parent)?;
    }

    // Append .tmp to preserve the original filename fully
    let file_name = path.file_name().ok_or_else(|| {
        Error::Config(format!(
            "Invalid path '{}': must have a filename",
            path.display()
        ))
    })?;
    let mut temp_filename = file_name.to_os_string();
    temp_filename.push(".tmp");
    let temp_path = path.with_file_name(temp_filename);

    std::fs::write(&temp_path, contents).map_err(|e| Error::FileWrite {
        path: temp_path.clone(),
        source: e,
    })?;

    std::fs::rename(&temp_path, path).map_err(|e| {
        let _ = std::fs::remove_file(&temp_path);
        Error::FileWrite {
            path: path.to_path_buf(),
            source: e,
        }
    })
}

// =============================================================================
// Tests
// =============================================================================
