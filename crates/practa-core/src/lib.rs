// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Practa flows and plugin distribution.
//!
//! This crate provides the error type, the shared data model (flow
//! definitions, execution state, plugin metadata, validation reports), and
//! the [`PractaStep`] trait that step implementations satisfy.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::PractaError;
pub use traits::{PractaStep, StepResolution};
pub use types::{
    AssetValidationResult, FlowDefinition, FlowExecutionState, FlowStatus, PractaContent,
    PractaContext, PractaDefinition, PractaMetadata, PractaOutput, PractaType, PreviousPracta,
    Severity, ValidationItem, ValidationReport,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn practa_type_uses_kebab_case_tags() {
        use std::str::FromStr;
        use strum::IntoEnumIterator;

        assert_eq!(PractaType::SilentMeditation.to_string(), "silent-meditation");
        assert_eq!(
            PractaType::from_str("intention-setting").unwrap(),
            PractaType::IntentionSetting
        );

        // Display and FromStr round-trip for every variant.
        for variant in PractaType::iter() {
            let parsed = PractaType::from_str(&variant.to_string()).expect("should parse back");
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn practa_type_serde_matches_display() {
        let json = serde_json::to_string(&PractaType::BodyScan).unwrap();
        assert_eq!(json, "\"body-scan\"");
        let parsed: PractaType = serde_json::from_str("\"journal\"").unwrap();
        assert_eq!(parsed, PractaType::Journal);
    }

    #[test]
    fn metadata_uses_camel_case_fields() {
        let json = serde_json::json!({
            "id": "calm-breath",
            "name": "Calm Breath",
            "description": "A short breathing exercise",
            "author": "Ada",
            "version": "1.0.0",
            "estimatedDuration": 120
        });
        let metadata: PractaMetadata = serde_json::from_value(json).unwrap();
        assert_eq!(metadata.estimated_duration, Some(120.0));
        assert!(metadata.category.is_none());

        let back = serde_json::to_value(&metadata).unwrap();
        assert_eq!(back["estimatedDuration"], 120.0);
        assert!(back.get("tags").is_none());
    }

    #[test]
    fn validation_report_tracks_validity() {
        let mut report = ValidationReport::default();
        assert!(report.is_valid);

        report.push(Severity::Success, "id looks good");
        report.push(Severity::Warning, "no category");
        assert!(report.is_valid);

        report.push(Severity::Error, "version missing");
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.successes.len(), 1);
    }

    #[test]
    fn output_content_serializes_with_type_key() {
        let output = PractaOutput::with_content(PractaContent::text("hi"))
            .with_metadata("mood", serde_json::json!("calm"));
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["content"]["type"], "text");
        assert_eq!(json["content"]["value"], "hi");
        assert_eq!(json["metadata"]["mood"], "calm");
    }

    #[test]
    fn flow_status_terminality() {
        assert!(!FlowStatus::Running.is_terminal());
        assert!(FlowStatus::Completed.is_terminal());
        assert!(FlowStatus::Aborted.is_terminal());
        assert_eq!(FlowStatus::Completed.to_string(), "completed");
    }

    #[test]
    fn practa_error_io_carries_path() {
        let err = PractaError::io(
            "/tmp/missing/metadata.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        let msg = err.to_string();
        assert!(msg.contains("/tmp/missing/metadata.json"));
        assert!(msg.contains("not found"));
    }

    #[test]
    fn step_trait_is_object_safe() {
        fn _assert_object_safe(_step: &dyn PractaStep) {}
    }
}
