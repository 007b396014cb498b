// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Applies an upstream template tarball onto a local checkout.
//!
//! Files are overwritten in archive order. A failure part-way leaves earlier
//! files written; callers only record the sync once [`apply_tarball`]
//! returns `Ok`.

use std::fs::File;
use std::path::{Component, Path, PathBuf};

use flate2::read::GzDecoder;
use practa_core::error::PractaError;
use tracing::{debug, info};

/// Paths an update must leave alone, relative to the checkout root.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    protected: Vec<PathBuf>,
    ignored: Vec<PathBuf>,
}

impl PathFilter {
    pub fn new<P, I>(protected: P, ignored: I) -> Self
    where
        P: IntoIterator,
        P::Item: AsRef<str>,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self {
            protected: protected.into_iter().filter_map(normalize).collect(),
            ignored: ignored.into_iter().filter_map(normalize).collect(),
        }
    }

    /// True if `relative` may be overwritten.
    pub fn allows(&self, relative: &Path) -> bool {
        !self
            .protected
            .iter()
            .chain(&self.ignored)
            .any(|prefix| relative.starts_with(prefix))
    }
}

/// `./plugin/` -> `plugin`; empty and root-only entries are dropped.
fn normalize(raw: impl AsRef<str>) -> Option<PathBuf> {
    let path: PathBuf = Path::new(raw.as_ref())
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .collect();
    (!path.as_os_str().is_empty()).then_some(path)
}

/// Outcome of one application pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Relative paths written, in archive order.
    pub written: Vec<String>,
    /// Relative paths left alone because of the filter.
    pub skipped: Vec<String>,
}

/// Extracts every regular file from the gzipped `tarball` into `root`,
/// stripping the archive's wrapper directory.
///
/// Entries with absolute paths or `..` components abort the pass.
pub fn apply_tarball(
    tarball: &[u8],
    root: &Path,
    filter: &PathFilter,
) -> Result<ApplyReport, PractaError> {
    let mut archive = tar::Archive::new(GzDecoder::new(tarball));
    let entries = archive
        .entries()
        .map_err(|e| archive_error("failed to read template tarball", e))?;

    let mut report = ApplyReport::default();
    for entry in entries {
        let mut entry = entry.map_err(|e| archive_error("corrupt tarball entry", e))?;
        if !entry.header().entry_type().is_file() {
            continue;
        }

        let raw = entry
            .path()
            .map_err(|e| archive_error("unreadable tarball path", e))?
            .into_owned();
        let Some(relative) = strip_wrapper(&raw)? else {
            continue;
        };
        let shown = relative.to_string_lossy().replace('\\', "/");

        if !filter.allows(&relative) {
            debug!(path = %shown, "skipped protected or ignored path");
            report.skipped.push(shown);
            continue;
        }

        let target = root.join(&relative);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PractaError::io(parent, e))?;
        }
        let expected = entry.size();
        let mut file = File::create(&target).map_err(|e| PractaError::io(&target, e))?;
        let copied = std::io::copy(&mut entry, &mut file)
            .map_err(|e| archive_error(&format!("failed to extract '{shown}'"), e))?;
        if copied != expected {
            return Err(PractaError::Archive {
                message: format!(
                    "truncated tarball entry '{shown}': expected {expected} bytes, got {copied}"
                ),
                source: None,
            });
        }
        debug!(path = %shown, "file updated");
        report.written.push(shown);
    }

    info!(
        written = report.written.len(),
        skipped = report.skipped.len(),
        "template tarball applied"
    );
    Ok(report)
}

/// Drops the first path component. Rejects paths that could escape `root`.
fn strip_wrapper(raw: &Path) -> Result<Option<PathBuf>, PractaError> {
    let mut components = raw.components();
    match components.next() {
        Some(Component::Normal(_)) => {}
        Some(Component::CurDir) => return strip_wrapper(components.as_path()),
        None => return Ok(None),
        Some(_) => return Err(unsafe_path(raw)),
    }

    let mut relative = PathBuf::new();
    for component in components {
        match component {
            Component::Normal(part) => relative.push(part),
            Component::CurDir => {}
            _ => return Err(unsafe_path(raw)),
        }
    }
    Ok((!relative.as_os_str().is_empty()).then_some(relative))
}

fn unsafe_path(raw: &Path) -> PractaError {
    PractaError::Archive {
        message: format!("refusing tarball entry '{}' outside the checkout", raw.display()),
        source: None,
    }
}

fn archive_error(message: &str, source: std::io::Error) -> PractaError {
    PractaError::Archive {
        message: format!("{message}: {source}"),
        source: Some(Box::new(source)),
    }
}
