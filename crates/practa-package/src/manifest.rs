// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generated distribution documents: `manifest.json` and `README.md`.

use practa_core::types::PractaMetadata;
use serde::{Deserialize, Serialize};

pub const MANIFEST_FILE: &str = "manifest.json";
pub const README_FILE: &str = "README.md";

const WIDGET_TYPE: &str = "widget";
const DEFAULT_CATEGORY: &str = "wellbeing";
const DEFAULT_TAGS: [&str; 2] = ["wellbeing", "mindfulness"];

/// Marketplace manifest bundled with every packaged plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginManifest {
    pub id: String,
    pub name: String,
    pub version: String,
    pub description: String,
    pub author: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<f64>,
    pub permissions: Vec<String>,
}

impl PluginManifest {
    /// Derives the manifest from author metadata, filling marketplace defaults.
    pub fn from_metadata(metadata: &PractaMetadata) -> Self {
        let tags = match &metadata.tags {
            Some(tags) if !tags.is_empty() => tags.clone(),
            _ => DEFAULT_TAGS.iter().map(|t| t.to_string()).collect(),
        };
        Self {
            id: metadata.id.clone(),
            name: metadata.name.clone(),
            version: metadata.version.clone(),
            description: metadata.description.clone(),
            author: metadata.author.clone(),
            kind: WIDGET_TYPE.to_string(),
            category: metadata
                .category
                .clone()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            tags,
            estimated_duration: metadata.estimated_duration,
            permissions: Vec::new(),
        }
    }
}

/// PascalCase identifier for a plugin name: `"box breathing!"` -> `BoxBreathing`.
pub fn component_identifier(name: &str) -> String {
    let ident: String = name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();

    match ident.chars().next() {
        None => "Practa".to_string(),
        Some(c) if c.is_ascii_digit() => format!("Practa{ident}"),
        Some(_) => ident,
    }
}

/// Renders the README shipped inside the archive.
pub fn render_readme(metadata: &PractaMetadata) -> String {
    let ident = component_identifier(&metadata.name);
    let mut out = format!(
        "# {name}\n\n{description}\n\n- **Id:** `{id}`\n- **Version:** {version}\n- **Author:** {author}\n",
        name = metadata.name,
        description = metadata.description,
        id = metadata.id,
        version = metadata.version,
        author = metadata.author,
    );
    if let Some(duration) = metadata.estimated_duration {
        out.push_str(&format!("- **Estimated duration:** {duration} seconds\n"));
    }
    out.push_str(&format!(
        "\n## Usage\n\n```tsx\nimport {ident} from \"./index\";\n\n<{ident} context={{context}} onComplete={{onComplete}} onSkip={{onSkip}} />\n```\n"
    ));
    out
}
