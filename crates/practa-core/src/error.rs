// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared by every Practa crate.

use std::path::Path;

use thiserror::Error;

/// The primary error type returned at every Practa component boundary.
///
/// Structural problems with a plugin (bad metadata, oversized assets) are
/// never reported through this type; they travel as itemized reports.
#[derive(Debug, Error)]
pub enum PractaError {
    /// Configuration errors (invalid TOML, missing required fields).
    #[error("configuration error: {0}")]
    Config(String),

    /// File system errors, tagged with the path that failed.
    #[error("I/O error at '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// The metadata document could not be read or written.
    #[error("metadata error: {0}")]
    Metadata(String),

    /// Archive assembly or extraction failed.
    #[error("archive error: {message}")]
    Archive {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Submission was refused locally because the asset audit failed.
    #[error("asset audit reported {error_count} error(s); refusing to submit")]
    AssetsInvalid { error_count: usize },

    /// The marketplace rejected or could not receive the submission.
    #[error("submission failed: {message}")]
    Submission {
        message: String,
        status: Option<u16>,
        body: Option<String>,
    },

    /// Upstream source-control API errors.
    #[error("upstream error: {message}")]
    Upstream {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A step implementation failed while a flow was running.
    #[error("step '{practa_type}' failed: {message}")]
    Step {
        practa_type: String,
        message: String,
    },

    /// Flow orchestration errors (no implementation for a step type, etc.).
    #[error("flow error: {0}")]
    Flow(String),

    /// Scaffold generation errors.
    #[error("scaffold error: {0}")]
    Scaffold(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PractaError {
    /// Wraps an `std::io::Error` with the path it occurred on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        PractaError::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    /// Builds an upstream error without an underlying source.
    pub fn upstream(message: impl Into<String>) -> Self {
        PractaError::Upstream {
            message: message.into(),
            source: None,
        }
    }
}
