// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Temporary plugin directories for tests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use practa_core::PractaMetadata;
use tempfile::TempDir;

/// Metadata that passes validation without warnings.
pub fn sample_metadata(id: &str) -> PractaMetadata {
    PractaMetadata {
        id: id.to_string(),
        name: "Calm Tide".to_string(),
        description: "Slow breathing with the waves".to_string(),
        author: "Test Author".to_string(),
        version: "1.0.0".to_string(),
        estimated_duration: Some(180.0),
        category: Some("wellbeing".to_string()),
        tags: Some(vec!["breath".to_string()]),
    }
}

/// Builder for a plugin directory inside a fresh temp dir.
pub struct PluginFixture {
    metadata: serde_json::Value,
    entry: Option<String>,
    declared: BTreeMap<String, String>,
    files: Vec<(String, Vec<u8>)>,
}

impl PluginFixture {
    /// A valid plugin: sample metadata and an `index.tsx` entry.
    pub fn new(id: &str) -> Self {
        Self {
            metadata: serde_json::to_value(sample_metadata(id)).unwrap_or_default(),
            entry: Some("index.tsx".to_string()),
            declared: BTreeMap::new(),
            files: Vec::new(),
        }
    }

    /// Replaces one metadata field with a raw JSON value.
    pub fn metadata_field(mut self, key: &str, value: serde_json::Value) -> Self {
        if let Some(obj) = self.metadata.as_object_mut() {
            obj.insert(key.to_string(), value);
        }
        self
    }

    /// Drops the entry component.
    pub fn without_entry(mut self) -> Self {
        self.entry = None;
        self
    }

    /// Declares an asset in `assets.json` without creating it.
    pub fn declare(mut self, key: &str, path: &str) -> Self {
        self.declared.insert(key.to_string(), path.to_string());
        self
    }

    /// Adds a file of `size` zero bytes at `path` (relative to the plugin).
    pub fn file(mut self, path: &str, size: usize) -> Self {
        self.files.push((path.to_string(), vec![0; size]));
        self
    }

    /// Declares and creates an asset of `size` bytes.
    pub fn asset(self, key: &str, path: &str, size: usize) -> Self {
        self.declare(key, path).file(path, size)
    }

    /// Writes everything to disk. The plugin lives at `{tempdir}/plugin`.
    ///
    /// Panics on I/O failure; only meant for tests.
    pub fn build(self) -> (TempDir, PathBuf) {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let dir = tmp.path().join("plugin");
        std::fs::create_dir_all(&dir).expect("create plugin dir");

        write(
            &dir.join("metadata.json"),
            serde_json::to_vec_pretty(&self.metadata).expect("encode metadata"),
        );
        if let Some(entry) = &self.entry {
            write(&dir.join(entry), b"export default function Plugin() { return null; }\n".to_vec());
        }
        if !self.declared.is_empty() {
            write(
                &dir.join("assets.json"),
                serde_json::to_vec_pretty(&self.declared).expect("encode assets"),
            );
        }
        for (path, bytes) in self.files {
            write(&dir.join(path), bytes);
        }
        (tmp, dir)
    }
}

fn write(path: &Path, bytes: Vec<u8>) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(path, bytes).expect("write fixture file");
}
