// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persisted last-synced marker for the fork role.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use practa_core::error::PractaError;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Upstream commit the local checkout was last synced to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncMarker {
    pub commit: String,
    pub synced_at: DateTime<Utc>,
}

impl SyncMarker {
    pub fn now(commit: impl Into<String>) -> Self {
        Self {
            commit: commit.into(),
            synced_at: Utc::now(),
        }
    }
}

/// Reads and writes the marker file.
#[derive(Debug, Clone)]
pub struct MarkerStore {
    path: PathBuf,
}

impl MarkerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the marker. A missing file is `None`.
    pub fn load(&self) -> Result<Option<SyncMarker>, PractaError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PractaError::io(&self.path, e)),
        };
        serde_json::from_str(&content).map(Some).map_err(|e| {
            PractaError::Internal(format!(
                "sync marker '{}' is corrupt: {e}",
                self.path.display()
            ))
        })
    }

    /// Overwrites the marker, creating its parent directory if needed.
    pub fn save(&self, marker: &SyncMarker) -> Result<(), PractaError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| PractaError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(marker)
            .map_err(|e| PractaError::Internal(format!("failed to encode sync marker: {e}")))?;
        std::fs::write(&self.path, json).map_err(|e| PractaError::io(&self.path, e))?;
        debug!(commit = %marker.commit, path = %self.path.display(), "sync marker saved");
        Ok(())
    }
}
