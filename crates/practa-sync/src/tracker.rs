// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Template sync tracker.
//!
//! Two roles, picked by whether a privileged owner credential is configured:
//!
//! - **Owner** maintains the upstream template. In sync means local git
//!   HEAD equals the upstream branch head, i.e. no unpushed template edits.
//! - **Fork** consumes the template. In sync means the persisted marker
//!   equals the upstream branch head, i.e. no un-pulled updates.
//!
//! `status` never fails: upstream or local read problems degrade to an
//! "in sync, unavailable" state carrying the reason. `update` fails hard.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use practa_config::model::PractaConfig;
use practa_core::error::PractaError;
use serde::Serialize;
use strum::Display;
use tracing::{info, warn};

use crate::apply::{PathFilter, apply_tarball};
use crate::git;
use crate::marker::{MarkerStore, SyncMarker};
use crate::upstream::UpstreamSource;
use crate::version::compare_versions;

/// Which side of the template this checkout is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SyncRole {
    Owner,
    Fork,
}

/// Result of a status check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSyncState {
    pub role: SyncRole,
    /// Local git HEAD (owner) or marker commit (fork).
    pub local_commit: Option<String>,
    pub latest_commit: Option<String>,
    pub local_version: Option<String>,
    pub latest_version: Option<String>,
    pub is_in_sync: bool,
    pub update_available: bool,
    /// False when the check could not be completed.
    pub available: bool,
    pub reason: Option<String>,
    /// True if this check wrote the first marker.
    pub seeded: bool,
}

impl TemplateSyncState {
    fn degraded(role: SyncRole, local_version: Option<String>, reason: String) -> Self {
        Self {
            role,
            local_commit: None,
            latest_commit: None,
            local_version,
            latest_version: None,
            is_in_sync: true,
            update_available: false,
            available: false,
            reason: Some(reason),
            seeded: false,
        }
    }
}

/// Result of a successful update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReport {
    pub commit: String,
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Settings for a [`TemplateSyncTracker`].
#[derive(Debug, Clone)]
pub struct TrackerOptions {
    pub root: PathBuf,
    pub role: SyncRole,
    /// Branch to track; `None` uses the upstream default branch.
    pub branch: Option<String>,
    /// Marker file, relative to `root`.
    pub marker_path: PathBuf,
    /// Version file, relative to `root`.
    pub version_file: PathBuf,
    pub filter: PathFilter,
}

impl TrackerOptions {
    pub fn from_config(config: &PractaConfig) -> Self {
        let template = &config.template;
        let role = match template.owner_token.as_deref() {
            Some(token) if !token.is_empty() => SyncRole::Owner,
            _ => SyncRole::Fork,
        };
        Self {
            root: PathBuf::from(&template.root),
            role,
            branch: template.branch.clone(),
            marker_path: PathBuf::from(&template.marker_path),
            version_file: PathBuf::from(&template.version_file),
            filter: PathFilter::new(config.protected_paths(), &template.ignored_paths),
        }
    }
}

/// Compares a local checkout against the upstream template.
pub struct TemplateSyncTracker {
    upstream: Arc<dyn UpstreamSource>,
    options: TrackerOptions,
    markers: MarkerStore,
}

impl TemplateSyncTracker {
    pub fn new(upstream: Arc<dyn UpstreamSource>, options: TrackerOptions) -> Self {
        let markers = MarkerStore::new(options.root.join(&options.marker_path));
        Self {
            upstream,
            options,
            markers,
        }
    }

    pub fn role(&self) -> SyncRole {
        self.options.role
    }

    pub fn root(&self) -> &Path {
        &self.options.root
    }

    /// Checks whether the checkout matches the upstream head.
    pub async fn status(&self) -> TemplateSyncState {
        let role = self.options.role;
        let local_version = self.local_version();

        let (reference, latest_commit) = match self.resolve_head().await {
            Ok(resolved) => resolved,
            Err(e) => {
                warn!(error = %e, "template status unavailable");
                return TemplateSyncState::degraded(role, local_version, e.to_string());
            }
        };

        let latest_version = match self.upstream.template_version(&reference).await {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "could not read upstream template version");
                None
            }
        };

        let (local_commit, seeded) = match role {
            SyncRole::Owner => match git::read_head(&self.options.root) {
                Ok(Some(head)) => (head, false),
                Ok(None) => {
                    return TemplateSyncState::degraded(
                        role,
                        local_version,
                        "local git HEAD could not be resolved".to_string(),
                    );
                }
                Err(e) => return TemplateSyncState::degraded(role, local_version, e.to_string()),
            },
            SyncRole::Fork => match self.markers.load() {
                Ok(Some(marker)) => (marker.commit, false),
                Ok(None) => {
                    // First run adopts the current upstream head as the baseline.
                    if let Err(e) = self.markers.save(&SyncMarker::now(&latest_commit)) {
                        warn!(error = %e, "failed to seed sync marker");
                    } else {
                        info!(
                            commit = %latest_commit,
                            path = %self.markers.path().display(),
                            "sync marker seeded"
                        );
                    }
                    (latest_commit.clone(), true)
                }
                Err(e) => return TemplateSyncState::degraded(role, local_version, e.to_string()),
            },
        };

        let is_in_sync = local_commit == latest_commit;
        let update_available = match role {
            SyncRole::Owner => false,
            SyncRole::Fork => {
                !is_in_sync
                    || matches!(
                        (&local_version, &latest_version),
                        (Some(local), Some(latest)) if compare_versions(local, latest).is_lt()
                    )
            }
        };

        info!(
            %role,
            local = %local_commit,
            latest = %latest_commit,
            in_sync = is_in_sync,
            "template status checked"
        );

        TemplateSyncState {
            role,
            local_commit: Some(local_commit),
            latest_commit: Some(latest_commit),
            local_version,
            latest_version,
            is_in_sync,
            update_available,
            available: true,
            reason: None,
            seeded,
        }
    }

    /// Pulls the upstream head into the checkout and records the new marker.
    ///
    /// The marker is written only after every file has been applied.
    pub async fn update(&self) -> Result<UpdateReport, PractaError> {
        let (_, commit) = self.resolve_head().await?;
        info!(%commit, root = %self.options.root.display(), "updating from template");

        let tarball = self.upstream.download_tarball(&commit).await?;
        let applied = apply_tarball(&tarball, &self.options.root, &self.options.filter)?;
        self.markers.save(&SyncMarker::now(&commit))?;

        Ok(UpdateReport {
            commit,
            written: applied.written,
            skipped: applied.skipped,
        })
    }

    /// Branch to track and its head commit.
    async fn resolve_head(&self) -> Result<(String, String), PractaError> {
        let branch = match &self.options.branch {
            Some(branch) => branch.clone(),
            None => self.upstream.default_branch().await?,
        };
        let commit = self.upstream.latest_commit(&branch).await?;
        Ok((branch, commit))
    }

    fn local_version(&self) -> Option<String> {
        let path = self.options.root.join(&self.options.version_file);
        std::fs::read_to_string(path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}
