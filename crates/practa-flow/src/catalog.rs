// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in step catalog and preset flows.
//!
//! Every [`PractaType`] has exactly one catalog entry; the mapping is a
//! `match`, so adding a variant without describing it does not compile.

use practa_core::types::PractaType;
use strum::IntoEnumIterator;

/// Display information for one step kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PractaEntry {
    pub practa_type: PractaType,
    pub name: &'static str,
    pub description: &'static str,
}

/// A named, ready-made sequence of step kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub key: &'static str,
    pub name: &'static str,
    pub practas: &'static [PractaType],
}

const PRESETS: &[Preset] = &[
    Preset {
        key: "morning-start",
        name: "Morning Start",
        practas: &[
            PractaType::IntentionSetting,
            PractaType::Breathwork,
            PractaType::Journal,
        ],
    },
    Preset {
        key: "evening-wind-down",
        name: "Evening Wind Down",
        practas: &[
            PractaType::Gratitude,
            PractaType::BodyScan,
            PractaType::SilentMeditation,
        ],
    },
    Preset {
        key: "quick-reset",
        name: "Quick Reset",
        practas: &[PractaType::Breathwork, PractaType::SilentMeditation],
    },
];

/// Returns the catalog entry for a step kind.
pub fn entry(practa_type: PractaType) -> PractaEntry {
    let (name, description) = match practa_type {
        PractaType::Journal => ("Journal", "Write freely about what is on your mind"),
        PractaType::SilentMeditation => (
            "Silent Meditation",
            "Sit in silence with a gentle timer",
        ),
        PractaType::Breathwork => ("Breathwork", "Follow a paced breathing pattern"),
        PractaType::Gratitude => ("Gratitude", "Name three things you are grateful for"),
        PractaType::BodyScan => ("Body Scan", "Move attention slowly through the body"),
        PractaType::IntentionSetting => (
            "Intention Setting",
            "Choose one intention to carry through the day",
        ),
        PractaType::Reflection => (
            "Reflection",
            "Look back on the session and note what stood out",
        ),
    };
    PractaEntry {
        practa_type,
        name,
        description,
    }
}

/// Returns catalog entries for every step kind, in declaration order.
pub fn builtin_catalog() -> Vec<PractaEntry> {
    PractaType::iter().map(entry).collect()
}

/// Search the catalog by query string.
///
/// Matches the tag, name, or description (case-insensitive). An empty
/// query returns everything.
pub fn search_catalog(query: &str) -> Vec<PractaEntry> {
    if query.is_empty() {
        return builtin_catalog();
    }
    let query_lower = query.to_lowercase();
    builtin_catalog()
        .into_iter()
        .filter(|e| {
            e.practa_type.to_string().contains(&query_lower)
                || e.name.to_lowercase().contains(&query_lower)
                || e.description.to_lowercase().contains(&query_lower)
        })
        .collect()
}

/// All preset flows.
pub fn presets() -> &'static [Preset] {
    PRESETS
}

/// Looks up a preset by key.
pub fn preset(key: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_covers_every_type() {
        let catalog = builtin_catalog();
        assert_eq!(catalog.len(), PractaType::iter().count());
        let types: std::collections::HashSet<PractaType> =
            catalog.iter().map(|e| e.practa_type).collect();
        assert_eq!(types.len(), catalog.len());
    }

    #[test]
    fn search_catalog_by_tag() {
        let results = search_catalog("silent-meditation");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].practa_type, PractaType::SilentMeditation);
    }

    #[test]
    fn search_catalog_case_insensitive() {
        let results = search_catalog("GRATITUDE");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Gratitude");
    }

    #[test]
    fn search_catalog_empty_returns_all() {
        assert_eq!(search_catalog("").len(), builtin_catalog().len());
    }

    #[test]
    fn search_catalog_no_match() {
        assert!(search_catalog("xyz_nonexistent").is_empty());
    }

    #[test]
    fn presets_are_non_empty_and_unique() {
        let mut keys = std::collections::HashSet::new();
        for p in presets() {
            assert!(!p.practas.is_empty(), "preset {} has no steps", p.key);
            assert!(keys.insert(p.key), "duplicate preset {}", p.key);
        }
        assert!(preset("quick-reset").is_some());
        assert!(preset("nope").is_none());
    }
}
