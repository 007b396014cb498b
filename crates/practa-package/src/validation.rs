// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structural and content checks for a plugin's metadata document.
//!
//! [`validate`] is pure: it inspects the raw JSON value (so type mismatches
//! are reported as findings rather than parse failures) and never touches
//! the file system. Each check contributes at most one finding.

use std::sync::LazyLock;

use practa_core::types::{Severity, ValidationReport};
use regex::Regex;
use serde_json::Value;

/// Lowercase kebab-case plugin id.
static ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap());

/// Strict `major.minor.patch`.
static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\d+\.\d+$").unwrap());

pub const ID_MIN_LEN: usize = 3;
pub const ID_MAX_LEN: usize = 50;

/// Validates a plugin's entry component and metadata.
///
/// `component` names the entry component the plugin exposes, or `None` if
/// it exposes nothing.
pub fn validate(component: Option<&str>, metadata: &Value) -> ValidationReport {
    let mut report = ValidationReport::default();

    match component {
        Some(name) if !name.trim().is_empty() => {
            report.push(Severity::Success, format!("entry component '{name}' found"));
        }
        _ => report.push(Severity::Error, "plugin must export an entry component"),
    }

    let Some(fields) = metadata.as_object() else {
        report.push(Severity::Error, "metadata must be a JSON object");
        return report;
    };

    check_id(&mut report, fields.get("id"));
    for field in ["name", "description", "author"] {
        check_required_string(&mut report, field, fields.get(field));
    }
    check_version(&mut report, fields.get("version"));
    check_estimated_duration(&mut report, fields.get("estimatedDuration"));
    check_category(&mut report, fields.get("category"));
    check_tags(&mut report, fields.get("tags"));

    report
}

/// Returns true if `id` is usable as a plugin id.
pub fn is_valid_id(id: &str) -> bool {
    (ID_MIN_LEN..=ID_MAX_LEN).contains(&id.len()) && ID_PATTERN.is_match(id)
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn check_id(report: &mut ValidationReport, value: Option<&Value>) {
    let Some(id) = present(value).and_then(Value::as_str) else {
        report.push(Severity::Error, "id is required and must be a string");
        return;
    };
    if !(ID_MIN_LEN..=ID_MAX_LEN).contains(&id.len()) {
        report.push(
            Severity::Error,
            format!("id must be between {ID_MIN_LEN} and {ID_MAX_LEN} characters (got {})", id.len()),
        );
    } else if !ID_PATTERN.is_match(id) {
        report.push(
            Severity::Error,
            format!("id '{id}' must be lowercase kebab-case (e.g. my-practa)"),
        );
    } else {
        report.push(Severity::Success, format!("id '{id}' is valid"));
    }
}

fn check_required_string(report: &mut ValidationReport, field: &str, value: Option<&Value>) {
    match present(value).and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => {
            report.push(Severity::Success, format!("{field} is set"));
        }
        _ => report.push(Severity::Error, format!("{field} is required")),
    }
}

fn check_version(report: &mut ValidationReport, value: Option<&Value>) {
    match present(value).and_then(Value::as_str) {
        None => report.push(Severity::Error, "version is required"),
        Some(v) if VERSION_PATTERN.is_match(v) => {
            report.push(Severity::Success, format!("version {v} is valid"));
        }
        Some(v) => report.push(
            Severity::Error,
            format!("version '{v}' must follow semantic versioning (e.g. 1.0.0)"),
        ),
    }
}

fn check_estimated_duration(report: &mut ValidationReport, value: Option<&Value>) {
    match present(value) {
        None => report.push(Severity::Warning, "estimatedDuration is not set"),
        Some(v) => match v.as_f64() {
            Some(d) if d >= 0.0 => {
                report.push(Severity::Success, "estimatedDuration is valid");
            }
            _ => report.push(
                Severity::Error,
                "estimatedDuration must be a non-negative number",
            ),
        },
    }
}

fn check_category(report: &mut ValidationReport, value: Option<&Value>) {
    match present(value) {
        None => report.push(Severity::Warning, "category is not set"),
        Some(Value::String(_)) => report.push(Severity::Success, "category is valid"),
        Some(_) => report.push(Severity::Error, "category must be a string"),
    }
}

fn check_tags(report: &mut ValidationReport, value: Option<&Value>) {
    match present(value) {
        None => {}
        Some(Value::Array(items)) if items.iter().all(Value::is_string) => {
            report.push(Severity::Success, "tags are valid");
        }
        Some(_) => report.push(Severity::Error, "tags must be an array of strings"),
    }
}
