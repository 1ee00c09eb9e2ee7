//! State file persistence
//!
//! The full snapshot lives in one JSON document. Every mutation is a whole
//! read-modify-commit cycle: the store never patches individual fields, so
//! the persisted file is always structurally complete. Commits go through a
//! temp file with an exclusive lock and an atomic rename, leaving the
//! last-known-good state untouched if anything fails. A missing or
//! unreadable file is a hard `Unavailable` error, never an empty snapshot.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;

use crate::domain::Snapshot;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Brewhouse state unavailable at {path}: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Brewhouse state at {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("Failed to write brewhouse state at {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Store for the brewhouse state snapshot
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    /// Creates a store backed by the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the state file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unavailable(&self, source: std::io::Error) -> StoreError {
        StoreError::Unavailable {
            path: self.path.clone(),
            source,
        }
    }

    fn corrupt(&self, reason: impl ToString) -> StoreError {
        StoreError::Corrupt {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }

    /// Loads and validates the current snapshot
    pub fn load(&self) -> Result<Snapshot, StoreError> {
        let file = File::open(&self.path).map_err(|e| self.unavailable(e))?;

        // Shared lock so a concurrent commit cannot be observed mid-rename
        file.lock_shared().map_err(|e| self.unavailable(e))?;

        let mut contents = String::new();
        (&file)
            .read_to_string(&mut contents)
            .map_err(|e| self.unavailable(e))?;

        let snapshot: Snapshot =
            serde_json::from_str(&contents).map_err(|e| self.corrupt(e))?;
        snapshot.validate().map_err(|e| self.corrupt(e))?;

        Ok(snapshot)
    }

    /// Commits the full snapshot atomically.
    ///
    /// The snapshot is validated before a single byte is written.
    pub fn commit(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        snapshot.validate().map_err(|e| self.corrupt(e))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::Write {
                path: self.path.clone(),
                source: e,
            })?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let write_err = |e| StoreError::Write {
            path: self.path.clone(),
            source: e,
        };

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(write_err)?;

            file.lock_exclusive().map_err(write_err)?;

            let mut writer = BufWriter::new(&file);
            let json = serde_json::to_string_pretty(snapshot)
                .map_err(|e| self.corrupt(e))?;
            writer.write_all(json.as_bytes()).map_err(write_err)?;
            writer.write_all(b"\n").map_err(write_err)?;
            writer.flush().map_err(write_err)?;
        }

        fs::rename(&temp_path, &self.path).map_err(write_err)?;

        Ok(())
    }
}
