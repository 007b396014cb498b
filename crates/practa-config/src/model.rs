// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Practa toolchain.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Practa configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PractaConfig {
    /// Process-wide settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Layout of the plugin directory being authored.
    #[serde(default)]
    pub plugin: PluginConfig,

    /// Asset audit limits.
    #[serde(default)]
    pub assets: AssetsConfig,

    /// Marketplace submission settings.
    #[serde(default)]
    pub marketplace: MarketplaceConfig,

    /// Upstream template sync settings.
    #[serde(default)]
    pub template: TemplateConfig,
}

impl PractaConfig {
    /// Paths the template sync must never overwrite: the plugin directory
    /// and this configuration file.
    pub fn protected_paths(&self) -> Vec<String> {
        vec![self.plugin.dir.clone(), self.template.config_file.clone()]
    }
}

/// Process-wide settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Plugin directory conventions.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PluginConfig {
    /// Directory holding the plugin, relative to the project root.
    #[serde(default = "default_plugin_dir")]
    pub dir: String,

    /// File exporting the plugin's entry component.
    #[serde(default = "default_entry")]
    pub entry: String,

    /// Metadata document inside the plugin directory.
    #[serde(default = "default_metadata_file")]
    pub metadata_file: String,

    /// Declared-asset manifest inside the plugin directory.
    #[serde(default = "default_assets_manifest")]
    pub assets_manifest: String,

    /// Physical assets folder inside the plugin directory.
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            dir: default_plugin_dir(),
            entry: default_entry(),
            metadata_file: default_metadata_file(),
            assets_manifest: default_assets_manifest(),
            assets_dir: default_assets_dir(),
        }
    }
}

fn default_plugin_dir() -> String {
    "my-practa".to_string()
}

fn default_entry() -> String {
    "index.tsx".to_string()
}

fn default_metadata_file() -> String {
    "metadata.json".to_string()
}

fn default_assets_manifest() -> String {
    "assets.json".to_string()
}

fn default_assets_dir() -> String {
    "assets".to_string()
}

/// Asset audit limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AssetsConfig {
    /// Largest allowed single asset, in bytes.
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,

    /// Largest allowed total of all assets, in bytes.
    #[serde(default = "default_max_total_bytes")]
    pub max_total_bytes: u64,

    /// Extensions (without dot, lowercase) accepted without a warning.
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: default_max_file_bytes(),
            max_total_bytes: default_max_total_bytes(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

fn default_max_file_bytes() -> u64 {
    5 * 1024 * 1024
}

fn default_max_total_bytes() -> u64 {
    25 * 1024 * 1024
}

fn default_allowed_extensions() -> Vec<String> {
    [
        "png", "jpg", "jpeg", "gif", "webp", "svg", // images
        "mp3", "wav", "m4a", "aac", "ogg", // audio
        "mp4", "mov", "webm", // video
        "json", "txt",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Marketplace submission settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MarketplaceConfig {
    /// Endpoint receiving multipart plugin submissions.
    #[serde(default = "default_submit_url")]
    pub submit_url: String,

    /// Optional request timeout. Unset means no timeout.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            submit_url: default_submit_url(),
            timeout_secs: None,
        }
    }
}

fn default_submit_url() -> String {
    "https://marketplace.practa.app/api/submissions".to_string()
}

/// Upstream template sync settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateConfig {
    /// Base URL of the source-control REST API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Owner of the upstream template repository.
    #[serde(default = "default_owner")]
    pub owner: String,

    /// Name of the upstream template repository.
    #[serde(default = "default_repo")]
    pub repo: String,

    /// Branch to track. `None` resolves the repository's default branch.
    #[serde(default)]
    pub branch: Option<String>,

    /// Privileged credential. Its presence selects the owner role.
    #[serde(default)]
    pub owner_token: Option<String>,

    /// Local checkout root the template is applied to.
    #[serde(default = "default_root")]
    pub root: String,

    /// Last-synced marker, relative to `root`.
    #[serde(default = "default_marker_path")]
    pub marker_path: String,

    /// File holding the template's semantic version, relative to `root`.
    #[serde(default = "default_version_file")]
    pub version_file: String,

    /// Project configuration file, protected from updates.
    #[serde(default = "default_config_file")]
    pub config_file: String,

    /// Paths never touched by an update.
    #[serde(default = "default_ignored_paths")]
    pub ignored_paths: Vec<String>,

    /// Optional request timeout. Unset means no timeout.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            owner: default_owner(),
            repo: default_repo(),
            branch: None,
            owner_token: None,
            root: default_root(),
            marker_path: default_marker_path(),
            version_file: default_version_file(),
            config_file: default_config_file(),
            ignored_paths: default_ignored_paths(),
            timeout_secs: None,
        }
    }
}

fn default_api_base_url() -> String {
    "https://api.github.com".to_string()
}

fn default_owner() -> String {
    "practa".to_string()
}

fn default_repo() -> String {
    "practa-starter".to_string()
}

fn default_root() -> String {
    ".".to_string()
}

fn default_marker_path() -> String {
    ".practa/template-sync.json".to_string()
}

fn default_version_file() -> String {
    "TEMPLATE_VERSION".to_string()
}

fn default_config_file() -> String {
    "practa.toml".to_string()
}

fn default_ignored_paths() -> Vec<String> {
    [".git", "target", "node_modules", ".practa"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
