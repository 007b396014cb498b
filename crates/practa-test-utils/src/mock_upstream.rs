// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock upstream template source.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use flate2::Compression;
use flate2::write::GzEncoder;
use practa_core::PractaError;
use practa_sync::UpstreamSource;
use tokio::sync::Mutex;

/// An in-memory upstream whose head commit, version and tarball can be
/// changed between calls. `set_offline(true)` makes every call fail.
pub struct MockUpstream {
    default_branch: String,
    head: Mutex<String>,
    version: Mutex<Option<String>>,
    tarball: Mutex<Vec<u8>>,
    offline: AtomicBool,
    downloads: AtomicUsize,
}

impl MockUpstream {
    /// Upstream on branch `main` at `head`, with no version file and an
    /// empty tarball.
    pub fn new(head: &str) -> Self {
        Self {
            default_branch: "main".to_string(),
            head: Mutex::new(head.to_string()),
            version: Mutex::new(None),
            tarball: Mutex::new(build_tarball("template", &[])),
            offline: AtomicBool::new(false),
            downloads: AtomicUsize::new(0),
        }
    }

    pub async fn set_head(&self, head: &str) {
        *self.head.lock().await = head.to_string();
    }

    pub async fn set_version(&self, version: Option<&str>) {
        *self.version.lock().await = version.map(str::to_string);
    }

    pub async fn set_tarball(&self, tarball: Vec<u8>) {
        *self.tarball.lock().await = tarball;
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of tarball downloads so far.
    pub fn downloads(&self) -> usize {
        self.downloads.load(Ordering::SeqCst)
    }

    fn check_online(&self) -> Result<(), PractaError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(PractaError::upstream("mock upstream is offline"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl UpstreamSource for MockUpstream {
    async fn default_branch(&self) -> Result<String, PractaError> {
        self.check_online()?;
        Ok(self.default_branch.clone())
    }

    async fn latest_commit(&self, branch: &str) -> Result<String, PractaError> {
        self.check_online()?;
        if branch != self.default_branch {
            return Err(PractaError::upstream(format!("no branch '{branch}'")));
        }
        Ok(self.head.lock().await.clone())
    }

    async fn template_version(&self, _reference: &str) -> Result<Option<String>, PractaError> {
        self.check_online()?;
        Ok(self.version.lock().await.clone())
    }

    async fn download_tarball(&self, _reference: &str) -> Result<Vec<u8>, PractaError> {
        self.check_online()?;
        self.downloads.fetch_add(1, Ordering::SeqCst);
        Ok(self.tarball.lock().await.clone())
    }
}

/// Builds a gzipped tarball shaped like a GitHub branch archive: every file
/// sits under a single `wrapper` directory.
///
/// Panics on I/O failure; only meant for tests.
pub fn build_tarball(wrapper: &str, files: &[(&str, &str)]) -> Vec<u8> {
    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    for (name, content) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_entry_type(tar::EntryType::Regular);
        builder
            .append_data(&mut header, format!("{wrapper}/{name}"), content.as_bytes())
            .expect("append tarball entry");
    }
    builder
        .into_inner()
        .and_then(|gz| gz.finish())
        .expect("finish tarball")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn offline_upstream_fails_every_call() {
        let upstream = MockUpstream::new("abc");
        upstream.set_offline(true);
        assert!(upstream.default_branch().await.is_err());
        assert!(upstream.download_tarball("abc").await.is_err());
        assert_eq!(upstream.downloads(), 0);
    }

    #[tokio::test]
    async fn head_can_move() {
        let upstream = MockUpstream::new("abc");
        upstream.set_head("def").await;
        assert_eq!(upstream.latest_commit("main").await.unwrap(), "def");
        assert!(upstream.latest_commit("dev").await.is_err());
    }

    #[test]
    fn tarball_is_gzip() {
        let bytes = build_tarball("wrap", &[("a.txt", "a")]);
        assert_eq!(&bytes[..2], &[0x1f, 0x8b]);
    }
}
