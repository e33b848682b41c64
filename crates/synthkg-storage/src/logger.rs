//! The key/value logging collaborator.
//!
//! `log(key, value)` appends `value` plus a newline to a file named `key`.
//! Generators and export pipelines take the trait object so runs can be
//! traced to disk or silenced entirely.

use crate::error::StorageError;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

pub trait KeyValueLog {
    /// Record `value` under `key`. A disabled logger must succeed silently.
    fn log(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn enable(&mut self);
    fn disable(&mut self);
    fn is_enabled(&self) -> bool;
}

/// File-backed logger: one append-only file per key under `folder`.
pub struct FsLogger {
    folder: PathBuf,
    enabled: bool,
}

impl FsLogger {
    /// Create the log folder; with `clean` any previous contents are
    /// removed first.
    pub fn new(folder: impl Into<PathBuf>, clean: bool) -> Result<Self, StorageError> {
        let folder = folder.into();
        if clean && folder.exists() {
            std::fs::remove_dir_all(&folder)?;
        }
        std::fs::create_dir_all(&folder)?;
        Ok(Self {
            folder,
            enabled: true,
        })
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }
}

impl KeyValueLog for FsLogger {
    fn log(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if !self.enabled {
            return Ok(());
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.folder.join(key))?;
        writeln!(file, "{value}")?;
        Ok(())
    }

    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Logger that drops everything.
#[derive(Debug, Default)]
pub struct NullLogger {
    enabled: bool,
}

impl KeyValueLog for NullLogger {
    fn log(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Ok(())
    }

    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
