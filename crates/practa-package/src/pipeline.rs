// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Packaging pipeline: archive download and remote submission.

use std::io::{Seek, Write};
use std::path::Path;
use std::sync::Arc;

use practa_core::error::PractaError;
use practa_core::types::{AssetValidationResult, PractaMetadata};
use tracing::{info, warn};

use crate::archive::{self, archive_file_name};
use crate::submit::{SubmissionReceipt, SubmissionTransport};

/// Turns a plugin directory into a distributable archive.
pub struct PackagingPipeline {
    transport: Arc<dyn SubmissionTransport>,
}

impl PackagingPipeline {
    pub fn new(transport: Arc<dyn SubmissionTransport>) -> Self {
        Self { transport }
    }

    /// Streams the archive into `writer` and returns its download filename.
    pub fn download<W: Write + Seek>(
        &self,
        plugin_dir: &Path,
        metadata: &PractaMetadata,
        writer: W,
    ) -> Result<String, PractaError> {
        let (mut writer, _) = archive::write_archive(plugin_dir, metadata, writer)?;
        writer
            .flush()
            .map_err(|e| PractaError::io(plugin_dir, e))?;
        Ok(archive_file_name(metadata))
    }

    /// Builds the archive in memory and hands it to the transport.
    ///
    /// An invalid asset audit is refused before anything is built or sent.
    pub async fn submit(
        &self,
        plugin_dir: &Path,
        metadata: &PractaMetadata,
        audit: &AssetValidationResult,
    ) -> Result<SubmissionReceipt, PractaError> {
        if !audit.valid {
            warn!(errors = audit.errors.len(), "submission refused: asset audit failed");
            return Err(PractaError::AssetsInvalid {
                error_count: audit.errors.len(),
            });
        }

        let package = archive::build_archive(plugin_dir, metadata)?;
        info!(
            file_name = %package.file_name,
            bytes = package.bytes.len(),
            "submitting package"
        );
        self.transport
            .submit(&package.file_name, package.bytes)
            .await
    }
}
