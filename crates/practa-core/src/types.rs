// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Data model shared by the flow engine and the packaging pipeline.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The closed set of step kinds a flow can be built from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum PractaType {
    Journal,
    SilentMeditation,
    Breathwork,
    Gratitude,
    BodyScan,
    IntentionSetting,
    Reflection,
}

/// One step inside a flow definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PractaDefinition {
    pub id: String,
    #[serde(rename = "type")]
    pub practa_type: PractaType,
    pub name: String,
    pub description: String,
}

/// An ordered chain of steps executed as one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowDefinition {
    pub id: String,
    pub name: String,
    pub practas: Vec<PractaDefinition>,
}

impl FlowDefinition {
    /// Number of steps in the flow.
    pub fn len(&self) -> usize {
        self.practas.len()
    }

    /// Returns true if the flow has no steps.
    pub fn is_empty(&self) -> bool {
        self.practas.is_empty()
    }
}

/// Typed content produced by a step, e.g. `{"type": "text", "value": "hi"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PractaContent {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: serde_json::Value,
}

impl PractaContent {
    /// Shorthand for text content.
    pub fn text(value: impl Into<String>) -> Self {
        Self {
            kind: "text".to_string(),
            value: serde_json::Value::String(value.into()),
        }
    }
}

/// Structured result a step hands back on completion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PractaOutput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<PractaContent>,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl PractaOutput {
    /// Output carrying only content.
    pub fn with_content(content: PractaContent) -> Self {
        Self {
            content: Some(content),
            metadata: BTreeMap::new(),
        }
    }

    /// Adds a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// The immediately preceding step's result, as seen by the current step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviousPracta {
    pub practa_id: String,
    pub practa_type: PractaType,
    pub content: Option<PractaContent>,
    pub metadata: BTreeMap<String, serde_json::Value>,
}

/// Context handed to the step at `practa_index`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PractaContext {
    pub flow_id: String,
    pub practa_index: usize,
    pub previous: Option<PreviousPracta>,
}

/// Lifecycle status of a flow execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FlowStatus {
    Running,
    Completed,
    Aborted,
}

impl FlowStatus {
    /// Completed and aborted are final.
    pub fn is_terminal(self) -> bool {
        !matches!(self, FlowStatus::Running)
    }
}

/// Ephemeral execution state of the single active flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowExecutionState {
    pub flow_id: String,
    pub flow_definition: FlowDefinition,
    pub current_index: usize,
    pub practa_outputs: Vec<PractaOutput>,
    pub status: FlowStatus,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Author-supplied metadata for a plugin (`metadata.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PractaMetadata {
    pub id: String,
    pub name: String,
    pub description: String,
    pub author: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Severity attached to each validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Success,
}

/// A single severity-tagged finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationItem {
    pub severity: Severity,
    pub message: String,
}

/// Result of validating a plugin's metadata and component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<ValidationItem>,
    pub warnings: Vec<ValidationItem>,
    pub successes: Vec<ValidationItem>,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            successes: Vec::new(),
        }
    }
}

impl ValidationReport {
    /// Files a finding into the bucket matching its severity.
    pub fn push(&mut self, severity: Severity, message: impl Into<String>) {
        let item = ValidationItem {
            severity,
            message: message.into(),
        };
        match severity {
            Severity::Error => self.errors.push(item),
            Severity::Warning => self.warnings.push(item),
            Severity::Success => self.successes.push(item),
        }
        self.is_valid = self.errors.is_empty();
    }
}

/// Result of auditing a plugin's assets folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub total_size_bytes: u64,
    pub file_count: usize,
}

impl Default for AssetValidationResult {
    fn default() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            total_size_bytes: 0,
            file_count: 0,
        }
    }
}
