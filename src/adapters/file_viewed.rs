//! File-based viewed storage.
//!
//! Keeps the last viewed issuance per office in `~/.afdview/viewed.json`:
//!
//! ```json
//! { "discussions": { "KPQR": "2024-05-01T15:42:00+00:00" } }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::data_dir;
use crate::error::StorageError;
use crate::traits::ViewedStorage;

/// The viewed state file name.
const VIEWED_FILE: &str = "viewed.json";

/// Contents of the viewed state file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ViewedState {
    /// Office -> issuance time of the last viewed discussion
    #[serde(default)]
    pub discussions: BTreeMap<String, String>,
}

/// Viewed storage backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileViewedStorage {
    /// Path to the state file.
    path: PathBuf,
}

impl FileViewedStorage {
    /// Storage in the default data directory.
    pub fn new() -> Result<Self, StorageError> {
        Ok(Self::at(data_dir()?.join(VIEWED_FILE)))
    }

    /// Storage at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the state file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the state file.
    ///
    /// A missing file is an empty state.
    pub fn load(&self) -> Result<ViewedState, StorageError> {
        if !self.path.exists() {
            return Ok(ViewedState::default());
        }

        let file = File::open(&self.path).map_err(|source| StorageError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| StorageError::Json {
            path: self.path.clone(),
            source,
        })
    }

    /// Save the state file, creating the parent directory if needed.
    pub fn save(&self, state: &ViewedState) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let file = File::create(&self.path).map_err(io_err)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, state).map_err(|source| StorageError::Json {
            path: self.path.clone(),
            source,
        })?;
        writer.flush().map_err(io_err)
    }
}

impl ViewedStorage for FileViewedStorage {
    fn set_discussion_viewed(&self, office: &str, issuance_time: &str) -> Result<(), StorageError> {
        // A corrupt file is replaced rather than blocking the bookkeeping.
        let mut state = self.load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "discarding unreadable viewed state");
            ViewedState::default()
        });
        state
            .discussions
            .insert(office.to_string(), issuance_time.to_string());
        self.save(&state)
    }

    fn discussion_viewed(&self, office: &str) -> Option<String> {
        match self.load() {
            Ok(mut state) => state.discussions.remove(office),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read viewed state");
                None
            }
        }
    }
}
