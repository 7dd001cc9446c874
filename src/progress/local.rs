//! Durable local storage for guest progress
//!
//! Guest progress is a single JSON blob under a fixed file name, mirroring
//! the one local-storage slot the web client uses. It is a within-session
//! convenience, never a durability guarantee.

use crate::core::error::Result;
use crate::progress::snapshot::ProgressSnapshot;
use std::fs;
use std::path::{Path, PathBuf};

/// Fixed file name for the guest blob
pub const GUEST_STORAGE_FILE: &str = "guest_progress.json";

/// Reads and writes the guest progress blob
#[derive(Debug, Clone)]
pub struct GuestStorage {
    path: PathBuf,
}

impl GuestStorage {
    /// Storage under `dir` using the fixed file name
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join(GUEST_STORAGE_FILE),
        }
    }

    /// Storage at an explicit file path
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cached blob, `None` if nothing has been written yet
    pub fn read(&self) -> Result<Option<ProgressSnapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Write the blob, creating parent directories as needed
    pub fn write(&self, snapshot: &ProgressSnapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Remove the blob if present
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
