// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scaffold generator for `practa init`.
//!
//! Creates a new plugin directory with the expected layout:
//! ```text
//! {id}/
//! +-- index.tsx       # Entry component stub
//! +-- metadata.json   # Author metadata, version 0.1.0
//! +-- assets.json     # Declared assets (empty)
//! +-- assets/         # Physical assets folder
//! ```

use std::path::{Path, PathBuf};

use practa_core::error::PractaError;
use practa_core::types::PractaMetadata;

use crate::manifest::component_identifier;
use crate::{metadata, validation};

/// Scaffolds a new plugin at `{target_dir}/{id}` and returns its path.
///
/// Returns an error if the id is not a valid plugin id or the directory
/// already exists.
pub fn scaffold_practa(id: &str, target_dir: &Path) -> Result<PathBuf, PractaError> {
    if !validation::is_valid_id(id) {
        return Err(PractaError::Scaffold(format!(
            "'{id}' is not a valid plugin id (3-50 characters, lowercase kebab-case)"
        )));
    }

    let plugin_dir = target_dir.join(id);
    if plugin_dir.exists() {
        return Err(PractaError::Scaffold(format!(
            "directory '{}' already exists",
            plugin_dir.display()
        )));
    }

    let assets_dir = plugin_dir.join("assets");
    std::fs::create_dir_all(&assets_dir).map_err(|e| PractaError::io(&assets_dir, e))?;

    let name = title_case(id);
    metadata::write(
        &plugin_dir.join("metadata.json"),
        &PractaMetadata {
            id: id.to_string(),
            name: name.clone(),
            description: format!("{name} practa"),
            author: "Your Name".to_string(),
            version: "0.1.0".to_string(),
            estimated_duration: Some(300.0),
            category: Some("wellbeing".to_string()),
            tags: Some(vec!["wellbeing".to_string()]),
        },
    )?;

    write_file(&plugin_dir.join("assets.json"), "{}\n")?;

    let ident = component_identifier(&name);
    let entry = format!(
        r#"import type {{ PractaProps }} from "@practa/sdk";

export default function {ident}({{ context, onComplete, onSkip }}: PractaProps) {{
  // context.previous holds the preceding step's output, if any.
  return null;
}}
"#
    );
    write_file(&plugin_dir.join("index.tsx"), &entry)?;

    Ok(plugin_dir)
}

/// `box-breathing` -> `Box Breathing`.
fn title_case(id: &str) -> String {
    id.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_file(path: &Path, content: &str) -> Result<(), PractaError> {
    std::fs::write(path, content).map_err(|e| PractaError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetAuditor;
    use crate::metadata::PluginLayout;

    #[test]
    fn scaffold_creates_directory_structure() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = scaffold_practa("box-breathing", tmp.path()).unwrap();

        assert_eq!(dir, tmp.path().join("box-breathing"));
        assert!(dir.join("index.tsx").is_file());
        assert!(dir.join("metadata.json").is_file());
        assert!(dir.join("assets.json").is_file());
        assert!(dir.join("assets").is_dir());
    }

    #[test]
    fn scaffold_entry_exports_component() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = scaffold_practa("box-breathing", tmp.path()).unwrap();
        let entry = std::fs::read_to_string(dir.join("index.tsx")).unwrap();
        assert!(entry.contains("export default function BoxBreathing("));
    }

    #[test]
    fn scaffolded_plugin_passes_validation_and_audit() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = scaffold_practa("evening-gratitude", tmp.path()).unwrap();

        let report = PluginLayout::new(&dir).validate().unwrap();
        assert!(report.is_valid, "{:?}", report.errors);
        assert!(report.warnings.is_empty());

        let audit = AssetAuditor::default().audit(&dir);
        assert!(audit.valid);
        assert_eq!(audit.file_count, 0);
    }

    #[test]
    fn scaffold_invalid_id_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let err = scaffold_practa("My Practa!", tmp.path()).unwrap_err();
        assert!(err.to_string().contains("not a valid plugin id"));
        assert!(!tmp.path().join("My Practa!").exists());
    }

    #[test]
    fn scaffold_duplicate_directory_fails() {
        let tmp = tempfile::tempdir().unwrap();
        scaffold_practa("dupe-check", tmp.path()).unwrap();
        let err = scaffold_practa("dupe-check", tmp.path()).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn title_case_splits_on_hyphens() {
        assert_eq!(title_case("box-breathing"), "Box Breathing");
        assert_eq!(title_case("abc"), "Abc");
    }
}
