// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Asset audit for a plugin directory.
//!
//! Declared assets come from the plugin's asset manifest (`assets.json`), a
//! flat JSON object mapping asset keys to paths relative to the plugin
//! directory:
//!
//! ```json
//! { "chime": "assets/chime.mp3", "background": "./assets/bg.png" }
//! ```
//!
//! The physical assets folder is walked independently of the declarations,
//! so undeclared files still count toward the size limits.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use practa_config::model::{AssetsConfig, PractaConfig};
use practa_core::types::AssetValidationResult;
use tracing::{debug, info};

/// Audits plugin assets against size limits and an extension allow-list.
#[derive(Debug, Clone)]
pub struct AssetAuditor {
    limits: AssetsConfig,
    manifest_file: String,
    assets_dir: String,
}

impl Default for AssetAuditor {
    fn default() -> Self {
        Self::new(AssetsConfig::default())
    }
}

impl AssetAuditor {
    /// Auditor with the given limits and the default file layout.
    pub fn new(limits: AssetsConfig) -> Self {
        Self {
            limits,
            manifest_file: "assets.json".to_string(),
            assets_dir: "assets".to_string(),
        }
    }

    /// Auditor using the limits and file layout from `config`.
    pub fn from_config(config: &PractaConfig) -> Self {
        Self {
            limits: config.assets.clone(),
            manifest_file: config.plugin.assets_manifest.clone(),
            assets_dir: config.plugin.assets_dir.clone(),
        }
    }

    /// Audits `plugin_dir`. Problems are reported in the result, never as errors.
    pub fn audit(&self, plugin_dir: &Path) -> AssetValidationResult {
        let mut result = AssetValidationResult::default();

        match read_declared_assets(&plugin_dir.join(&self.manifest_file)) {
            Ok(declared) => self.check_declared(plugin_dir, &declared, &mut result),
            Err(message) => result.errors.push(message),
        }

        let assets_root = plugin_dir.join(&self.assets_dir);
        if assets_root.is_dir() {
            let mut files = Vec::new();
            if let Err(message) = collect_files(&assets_root, &mut files) {
                result.errors.push(message);
            }
            files.sort();
            for (path, size) in files {
                self.check_file(plugin_dir, &path, size, &mut result);
            }
        }

        if result.total_size_bytes > self.limits.max_total_bytes {
            result.errors.push(format!(
                "total asset size {} exceeds the {} limit",
                format_bytes(result.total_size_bytes),
                format_bytes(self.limits.max_total_bytes)
            ));
        }

        result.valid = result.errors.is_empty();
        info!(
            dir = %plugin_dir.display(),
            files = result.file_count,
            bytes = result.total_size_bytes,
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "asset audit finished"
        );
        result
    }

    fn check_declared(
        &self,
        plugin_dir: &Path,
        declared: &BTreeMap<String, String>,
        result: &mut AssetValidationResult,
    ) {
        for (key, raw_path) in declared {
            let relative = raw_path.strip_prefix("./").unwrap_or(raw_path);
            let relative = Path::new(relative);
            if !is_contained(relative) {
                result.errors.push(format!(
                    "asset '{key}' path '{raw_path}' must stay inside the plugin directory"
                ));
                continue;
            }
            if !relative.starts_with(&self.assets_dir) {
                result.errors.push(format!(
                    "asset '{key}' path '{raw_path}' must be under '{}/'",
                    self.assets_dir
                ));
                continue;
            }
            if !plugin_dir.join(relative).is_file() {
                result
                    .errors
                    .push(format!("asset '{key}' not found at '{raw_path}'"));
            } else {
                debug!(key = %key, path = %raw_path, "declared asset present");
            }
        }
    }

    fn check_file(
        &self,
        plugin_dir: &Path,
        path: &Path,
        size: u64,
        result: &mut AssetValidationResult,
    ) {
        let display = path
            .strip_prefix(plugin_dir)
            .unwrap_or(path)
            .display()
            .to_string();

        result.file_count += 1;
        result.total_size_bytes += size;

        if size > self.limits.max_file_bytes {
            result.errors.push(format!(
                "'{display}' is {} (limit {})",
                format_bytes(size),
                format_bytes(self.limits.max_file_bytes)
            ));
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension {
            Some(ext) if self.limits.allowed_extensions.iter().any(|a| a == &ext) => {}
            Some(ext) => result
                .warnings
                .push(format!("'{display}' has unsupported extension '.{ext}'")),
            None => result
                .warnings
                .push(format!("'{display}' has no file extension")),
        }
    }
}

/// Reads the declared-asset manifest. A missing file means no declarations.
pub fn read_declared_assets(path: &Path) -> Result<BTreeMap<String, String>, String> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(e) => return Err(format!("failed to read '{}': {e}", path.display())),
    };
    serde_json::from_str(&content).map_err(|e| {
        format!(
            "'{}' must be a JSON object of asset keys to paths: {e}",
            path.display()
        )
    })
}

/// Recursively collects regular files under `dir` with their sizes.
fn collect_files(dir: &Path, out: &mut Vec<(PathBuf, u64)>) -> Result<(), String> {
    let entries =
        std::fs::read_dir(dir).map_err(|e| format!("failed to read '{}': {e}", dir.display()))?;
    for entry in entries {
        let entry = entry.map_err(|e| format!("failed to read '{}': {e}", dir.display()))?;
        let path = entry.path();
        let metadata = std::fs::metadata(&path)
            .map_err(|e| format!("failed to stat '{}': {e}", path.display()))?;
        if metadata.is_dir() {
            collect_files(&path, out)?;
        } else if metadata.is_file() {
            out.push((path, metadata.len()));
        }
    }
    Ok(())
}

/// True if `path` is relative and never climbs out of its base.
pub(crate) fn is_contained(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Human-readable byte count (`512 B`, `4.0 KiB`, `5.0 MiB`).
pub fn format_bytes(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = KIB * 1024.0;
    let b = bytes as f64;
    if b >= MIB {
        format!("{:.1} MiB", b / MIB)
    } else if b >= KIB {
        format!("{:.1} KiB", b / KIB)
    } else {
        format!("{bytes} B")
    }
}
