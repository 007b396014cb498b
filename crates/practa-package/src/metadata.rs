// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reading and writing the plugin metadata document, plus the plugin
//! directory layout.

use std::path::{Path, PathBuf};

use practa_config::model::PractaConfig;
use practa_core::error::PractaError;
use practa_core::types::{PractaMetadata, ValidationReport};
use serde_json::Value;
use tracing::debug;

use crate::validation;

/// Reads the metadata document as untyped JSON, for validation.
pub fn read_raw(path: &Path) -> Result<Value, PractaError> {
    let content = std::fs::read_to_string(path).map_err(|e| PractaError::io(path, e))?;
    serde_json::from_str(&content)
        .map_err(|e| PractaError::Metadata(format!("'{}' is not valid JSON: {e}", path.display())))
}

/// Reads the metadata document into its typed form.
pub fn read(path: &Path) -> Result<PractaMetadata, PractaError> {
    let raw = read_raw(path)?;
    serde_json::from_value(raw)
        .map_err(|e| PractaError::Metadata(format!("'{}': {e}", path.display())))
}

/// Overwrites the metadata document as a whole.
pub fn write(path: &Path, metadata: &PractaMetadata) -> Result<(), PractaError> {
    let mut json = serde_json::to_string_pretty(metadata)
        .map_err(|e| PractaError::Metadata(e.to_string()))?;
    json.push('\n');
    std::fs::write(path, json).map_err(|e| PractaError::io(path, e))?;
    debug!(path = %path.display(), "metadata written");
    Ok(())
}

/// Where a plugin's files live.
#[derive(Debug, Clone)]
pub struct PluginLayout {
    pub root: PathBuf,
    pub entry: String,
    pub metadata_file: String,
}

impl PluginLayout {
    /// Layout with default file names rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entry: "index.tsx".to_string(),
            metadata_file: "metadata.json".to_string(),
        }
    }

    /// Layout described by `config`, with `root` overriding `plugin.dir`.
    pub fn from_config(config: &PractaConfig, root: Option<&Path>) -> Self {
        Self {
            root: root
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(&config.plugin.dir)),
            entry: config.plugin.entry.clone(),
            metadata_file: config.plugin.metadata_file.clone(),
        }
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.root.join(&self.metadata_file)
    }

    /// Name of the entry component if its file exists.
    pub fn entry_component(&self) -> Option<&str> {
        self.root
            .join(&self.entry)
            .is_file()
            .then_some(self.entry.as_str())
    }

    /// Runs the metadata validation against this plugin's files.
    pub fn validate(&self) -> Result<ValidationReport, PractaError> {
        let raw = read_raw(&self.metadata_path())?;
        Ok(validation::validate(self.entry_component(), &raw))
    }
}
