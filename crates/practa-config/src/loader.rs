// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./practa.toml` > `~/.config/practa/practa.toml` > `/etc/practa/practa.toml`
//! with environment variable overrides via `PRACTA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::PractaConfig;

/// Top-level sections an environment variable may address.
const SECTIONS: &[&str] = &["general", "plugin", "assets", "marketplace", "template"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/practa/practa.toml` (system-wide)
/// 3. `~/.config/practa/practa.toml` (user XDG config)
/// 4. `./practa.toml` (local directory)
/// 5. `PRACTA_*` environment variables
pub fn load_config() -> Result<PractaConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<PractaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PractaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PractaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PractaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PractaConfig::default()))
        .merge(Toml::file("/etc/practa/practa.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("practa/practa.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("practa.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider.
///
/// Only the leading section name is turned into a dot, so
/// `PRACTA_PLUGIN_ASSETS_MANIFEST` maps to `plugin.assets_manifest` and
/// `PRACTA_TEMPLATE_OWNER_TOKEN` maps to `template.owner_token`.
fn env_provider() -> Env {
    Env::prefixed("PRACTA_").map(|key| env_key_to_path(key.as_str()).into())
}

/// Maps a lowercased, prefix-stripped env var name to a config key path.
pub fn env_key_to_path(key: &str) -> String {
    for section in SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_split_only_on_section_prefix() {
        assert_eq!(
            env_key_to_path("plugin_assets_manifest"),
            "plugin.assets_manifest"
        );
        assert_eq!(env_key_to_path("template_owner_token"), "template.owner_token");
        assert_eq!(env_key_to_path("assets_max_file_bytes"), "assets.max_file_bytes");
        assert_eq!(env_key_to_path("general_log_level"), "general.log_level");
    }

    #[test]
    fn unknown_section_is_left_alone() {
        assert_eq!(env_key_to_path("something_else"), "something_else");
    }
}
