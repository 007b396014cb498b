// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as URL schemes, size limit ordering, and relative plugin paths.

use std::path::Path;

use crate::diagnostic::ConfigError;
use crate::model::PractaConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &PractaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    let level = config.general.log_level.trim().to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        fail(format!(
            "general.log_level `{}` must be one of: {}",
            config.general.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    // Plugin layout
    if config.plugin.dir.trim().is_empty() {
        fail("plugin.dir must not be empty".to_string());
    } else if Path::new(&config.plugin.dir).is_absolute() {
        fail(format!(
            "plugin.dir `{}` must be relative to the project root",
            config.plugin.dir
        ));
    }
    for (key, value) in [
        ("plugin.entry", &config.plugin.entry),
        ("plugin.metadata_file", &config.plugin.metadata_file),
        ("plugin.assets_manifest", &config.plugin.assets_manifest),
        ("plugin.assets_dir", &config.plugin.assets_dir),
    ] {
        if value.trim().is_empty() {
            fail(format!("{key} must not be empty"));
        }
    }

    // Asset limits
    if config.assets.max_file_bytes == 0 {
        fail("assets.max_file_bytes must be greater than 0".to_string());
    }
    if config.assets.max_total_bytes < config.assets.max_file_bytes {
        fail(format!(
            "assets.max_total_bytes ({}) must be at least assets.max_file_bytes ({})",
            config.assets.max_total_bytes, config.assets.max_file_bytes
        ));
    }
    if config.assets.allowed_extensions.is_empty() {
        fail("assets.allowed_extensions must not be empty".to_string());
    }
    for ext in &config.assets.allowed_extensions {
        if ext.starts_with('.') || ext.chars().any(|c| c.is_ascii_uppercase()) {
            fail(format!(
                "assets.allowed_extensions entry `{ext}` must be lowercase without a leading dot"
            ));
        }
    }

    // Network endpoints
    for (key, url) in [
        ("marketplace.submit_url", &config.marketplace.submit_url),
        ("template.api_base_url", &config.template.api_base_url),
    ] {
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            fail(format!("{key} `{url}` must be an http(s) URL"));
        }
    }
    for (key, timeout) in [
        ("marketplace.timeout_secs", config.marketplace.timeout_secs),
        ("template.timeout_secs", config.template.timeout_secs),
    ] {
        if timeout == Some(0) {
            fail(format!("{key} must be greater than 0 when set"));
        }
    }

    // Template repository
    if config.template.owner.trim().is_empty() {
        fail("template.owner must not be empty".to_string());
    }
    if config.template.repo.trim().is_empty() {
        fail("template.repo must not be empty".to_string());
    }
    if let Some(branch) = &config.template.branch
        && branch.trim().is_empty()
    {
        fail("template.branch must not be empty when set".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
