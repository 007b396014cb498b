// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Zip assembly for a plugin directory.
//!
//! The archive is flat: paths are relative to the plugin directory with no
//! wrapper folder. `metadata.json`, `manifest.json` and `README.md` at the
//! root are always the generated versions; physical files with those names
//! at the root are left out.

use std::io::{Cursor, Seek, Write};
use std::path::{Path, PathBuf};

use practa_core::error::PractaError;
use practa_core::types::PractaMetadata;
use tracing::{debug, info};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::manifest::{MANIFEST_FILE, PluginManifest, README_FILE, render_readme};

pub const METADATA_FILE: &str = "metadata.json";

const GENERATED: [&str; 3] = [METADATA_FILE, MANIFEST_FILE, README_FILE];

/// A fully written archive held in memory.
#[derive(Debug, Clone)]
pub struct PackageArchive {
    pub file_name: String,
    pub bytes: Vec<u8>,
    /// Entry names in write order.
    pub entries: Vec<String>,
}

/// `{id}-{version}.zip`.
pub fn archive_file_name(metadata: &PractaMetadata) -> String {
    format!("{}-{}.zip", metadata.id, metadata.version)
}

/// Writes the archive for `plugin_dir` into `writer` and returns it once the
/// zip is finalized, together with the entry names.
pub fn write_archive<W: Write + Seek>(
    plugin_dir: &Path,
    metadata: &PractaMetadata,
    writer: W,
) -> Result<(W, Vec<String>), PractaError> {
    let mut files = Vec::new();
    collect_files(plugin_dir, plugin_dir, &mut files)?;
    files.sort();

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = ZipWriter::new(writer);
    let mut entries = Vec::with_capacity(files.len() + GENERATED.len());

    for (name, path) in files {
        if GENERATED.contains(&name.as_str()) {
            debug!(entry = %name, "physical file replaced by generated version");
            continue;
        }
        let bytes = std::fs::read(&path).map_err(|e| PractaError::io(&path, e))?;
        add_entry(&mut zip, &name, &bytes, options)?;
        entries.push(name);
    }

    let metadata_json = to_pretty_json(metadata)?;
    add_entry(&mut zip, METADATA_FILE, metadata_json.as_bytes(), options)?;
    let manifest_json = to_pretty_json(&PluginManifest::from_metadata(metadata))?;
    add_entry(&mut zip, MANIFEST_FILE, manifest_json.as_bytes(), options)?;
    add_entry(&mut zip, README_FILE, render_readme(metadata).as_bytes(), options)?;
    entries.extend(GENERATED.iter().map(|s| s.to_string()));

    let writer = zip
        .finish()
        .map_err(|e| archive_error("failed to finalize archive", e))?;

    info!(
        dir = %plugin_dir.display(),
        entries = entries.len(),
        "archive written"
    );
    Ok((writer, entries))
}

/// Builds the archive entirely in memory.
///
/// The returned bytes are only taken from the buffer after the zip writer
/// has finished.
pub fn build_archive(
    plugin_dir: &Path,
    metadata: &PractaMetadata,
) -> Result<PackageArchive, PractaError> {
    let (cursor, entries) = write_archive(plugin_dir, metadata, Cursor::new(Vec::new()))?;
    let bytes = cursor.into_inner();
    debug!(bytes = bytes.len(), "archive materialized in memory");
    Ok(PackageArchive {
        file_name: archive_file_name(metadata),
        bytes,
        entries,
    })
}

fn add_entry<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    name: &str,
    bytes: &[u8],
    options: SimpleFileOptions,
) -> Result<(), PractaError> {
    zip.start_file(name, options)
        .map_err(|e| archive_error(&format!("failed to start entry '{name}'"), e))?;
    zip.write_all(bytes)
        .map_err(|e| archive_error(&format!("failed to write entry '{name}'"), e))?;
    Ok(())
}

/// Collects `(relative name, absolute path)` for every file under `dir`.
fn collect_files(
    base: &Path,
    dir: &Path,
    out: &mut Vec<(String, PathBuf)>,
) -> Result<(), PractaError> {
    let entries = std::fs::read_dir(dir).map_err(|e| PractaError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| PractaError::io(dir, e))?;
        let path = entry.path();
        let metadata = std::fs::metadata(&path).map_err(|e| PractaError::io(&path, e))?;
        if metadata.is_dir() {
            collect_files(base, &path, out)?;
        } else if metadata.is_file() {
            let relative = path.strip_prefix(base).map_err(|_| {
                PractaError::Internal(format!("'{}' is outside '{}'", path.display(), base.display()))
            })?;
            let name = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            out.push((name, path));
        }
    }
    Ok(())
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> Result<String, PractaError> {
    let mut json =
        serde_json::to_string_pretty(value).map_err(|e| archive_error("failed to encode JSON", e))?;
    json.push('\n');
    Ok(json)
}

fn archive_error(
    message: &str,
    source: impl std::error::Error + Send + Sync + 'static,
) -> PractaError {
    PractaError::Archive {
        message: format!("{message}: {source}"),
        source: Some(Box::new(source)),
    }
}
