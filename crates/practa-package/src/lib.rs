// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin validation, asset audit, packaging, and submission.
//!
//! The pieces compose in order:
//! - [`validation::validate`] checks metadata and the entry component.
//! - [`AssetAuditor`] checks declared and physical assets.
//! - [`PackagingPipeline`] zips the plugin and submits it through a
//!   [`SubmissionTransport`].

pub mod archive;
pub mod assets;
pub mod manifest;
pub mod metadata;
pub mod pipeline;
pub mod scaffold;
pub mod submit;
pub mod validation;

pub use archive::{PackageArchive, archive_file_name, build_archive, write_archive};
pub use assets::AssetAuditor;
pub use manifest::PluginManifest;
pub use metadata::PluginLayout;
pub use pipeline::PackagingPipeline;
pub use scaffold::scaffold_practa;
pub use submit::{HttpSubmissionTransport, SubmissionReceipt, SubmissionTransport};
pub use validation::validate;
