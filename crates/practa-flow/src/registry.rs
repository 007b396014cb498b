// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Practa registry: builds step and flow definitions from the catalog.
//!
//! Step ids inside a flow are positional (`{type}-{index}`), so a flow that
//! repeats a step kind still gets distinct ids. Stand-alone steps draw from a
//! per-registry counter instead.

use std::sync::atomic::{AtomicU64, Ordering};

use practa_core::types::{FlowDefinition, PractaDefinition, PractaType};
use tracing::debug;

use crate::catalog::{self, PractaEntry};

/// Optional overrides for [`PractaRegistry::create_flow`].
#[derive(Debug, Clone, Default)]
pub struct CreateFlowOptions {
    /// Explicit flow id. Defaults to `flow-{kebab(name)}`.
    pub id: Option<String>,
}

/// Builds [`PractaDefinition`]s and [`FlowDefinition`]s.
#[derive(Debug, Default)]
pub struct PractaRegistry {
    counter: AtomicU64,
}

impl PractaRegistry {
    /// Create a new registry with its id counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog entry for a step kind.
    pub fn describe(&self, practa_type: PractaType) -> PractaEntry {
        catalog::entry(practa_type)
    }

    /// All catalog entries.
    pub fn list(&self) -> Vec<PractaEntry> {
        catalog::builtin_catalog()
    }

    /// Builds one step definition.
    ///
    /// Without an explicit id the result is `{type}-{n}`, where `n` counts
    /// up from 1 for every defaulted id this registry hands out.
    pub fn create_practa(&self, practa_type: PractaType, id: Option<&str>) -> PractaDefinition {
        let id = match id {
            Some(id) => id.to_string(),
            None => {
                let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
                format!("{practa_type}-{n}")
            }
        };
        definition(practa_type, id)
    }

    /// Assembles a flow from an ordered list of step kinds.
    pub fn create_flow(
        &self,
        name: &str,
        practa_types: &[PractaType],
        opts: CreateFlowOptions,
    ) -> FlowDefinition {
        let id = opts.id.unwrap_or_else(|| default_flow_id(name));
        let practas: Vec<PractaDefinition> = practa_types
            .iter()
            .enumerate()
            .map(|(index, t)| definition(*t, format!("{t}-{index}")))
            .collect();

        debug!(flow_id = %id, steps = practas.len(), "flow definition created");

        FlowDefinition {
            id,
            name: name.to_string(),
            practas,
        }
    }

    /// Builds a flow from a named preset, or `None` for an unknown key.
    pub fn create_preset(&self, key: &str) -> Option<FlowDefinition> {
        let preset = catalog::preset(key)?;
        Some(self.create_flow(
            preset.name,
            preset.practas,
            CreateFlowOptions {
                id: Some(format!("flow-{}", preset.key)),
            },
        ))
    }
}

fn definition(practa_type: PractaType, id: String) -> PractaDefinition {
    let entry = catalog::entry(practa_type);
    PractaDefinition {
        id,
        practa_type,
        name: entry.name.to_string(),
        description: entry.description.to_string(),
    }
}

/// `flow-` followed by the kebab-cased name.
fn default_flow_id(name: &str) -> String {
    let slug = name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| part.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        "flow".to_string()
    } else {
        format!("flow-{slug}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_practa_defaults_id_from_counter() {
        let registry = PractaRegistry::new();
        let a = registry.create_practa(PractaType::Journal, None);
        let b = registry.create_practa(PractaType::Journal, None);
        let c = registry.create_practa(PractaType::Breathwork, None);
        assert_eq!(a.id, "journal-1");
        assert_eq!(b.id, "journal-2");
        assert_eq!(c.id, "breathwork-3");
        assert_eq!(a.name, "Journal");
    }

    #[test]
    fn create_practa_keeps_explicit_id() {
        let registry = PractaRegistry::new();
        let p = registry.create_practa(PractaType::BodyScan, Some("scan"));
        assert_eq!(p.id, "scan");
        assert_eq!(p.practa_type, PractaType::BodyScan);
        // Explicit ids do not consume the counter.
        assert_eq!(registry.create_practa(PractaType::BodyScan, None).id, "body-scan-1");
    }

    #[test]
    fn create_flow_derives_ids() {
        let registry = PractaRegistry::new();
        let flow = registry.create_flow(
            "My Evening Flow!",
            &[PractaType::Journal, PractaType::SilentMeditation],
            CreateFlowOptions::default(),
        );
        assert_eq!(flow.id, "flow-my-evening-flow");
        assert_eq!(flow.name, "My Evening Flow!");
        assert_eq!(flow.practas[0].id, "journal-0");
        assert_eq!(flow.practas[1].id, "silent-meditation-1");
    }

    #[test]
    fn repeated_types_do_not_collide() {
        let registry = PractaRegistry::new();
        let flow = registry.create_flow(
            "double",
            &[PractaType::Breathwork, PractaType::Journal, PractaType::Breathwork],
            CreateFlowOptions::default(),
        );
        let ids: std::collections::HashSet<&str> =
            flow.practas.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn create_flow_respects_explicit_id() {
        let registry = PractaRegistry::new();
        let flow = registry.create_flow(
            "x",
            &[PractaType::Gratitude],
            CreateFlowOptions {
                id: Some("custom".to_string()),
            },
        );
        assert_eq!(flow.id, "custom");
    }

    #[test]
    fn blank_name_gets_plain_flow_id() {
        assert_eq!(default_flow_id("!!!"), "flow");
    }

    #[test]
    fn create_preset_builds_known_preset() {
        let registry = PractaRegistry::new();
        let flow = registry.create_preset("evening-wind-down").unwrap();
        assert_eq!(flow.id, "flow-evening-wind-down");
        assert_eq!(flow.len(), 3);
        assert_eq!(flow.practas[2].practa_type, PractaType::SilentMeditation);
        assert!(registry.create_preset("unknown").is_none());
    }
}
