// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Upstream template sync for Practa checkouts.
//!
//! [`TemplateSyncTracker`] reports whether a checkout matches the upstream
//! template and applies upstream updates. Upstream access goes through
//! [`UpstreamSource`]; [`GitHubUpstream`] is the REST implementation.

pub mod apply;
pub mod git;
pub mod marker;
pub mod tracker;
pub mod upstream;
pub mod version;

pub use apply::{ApplyReport, PathFilter, apply_tarball};
pub use marker::{MarkerStore, SyncMarker};
pub use tracker::{SyncRole, TemplateSyncState, TemplateSyncTracker, TrackerOptions, UpdateReport};
pub use upstream::{GitHubUpstream, UpstreamSource};
pub use version::compare_versions;
