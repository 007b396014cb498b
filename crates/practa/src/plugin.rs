// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `practa init | validate | audit | package | submit` command implementations.

use std::path::Path;
use std::sync::Arc;

use practa_config::PractaConfig;
use practa_core::{AssetValidationResult, PractaError, ValidationReport};
use practa_package::assets::format_bytes;
use practa_package::{
    AssetAuditor, HttpSubmissionTransport, PackagingPipeline, PluginLayout, archive_file_name,
    metadata, scaffold_practa,
};

use crate::output::{self, Mark};

/// Run the `practa init` command.
pub fn run_init(id: &str, parent: &Path, plain: bool) -> Result<bool, PractaError> {
    let created = scaffold_practa(id, parent)?;
    let use_color = output::use_color(plain);

    output::print_header("practa init");
    output::print_line(
        Mark::Ok,
        &format!("created {}", created.display()),
        use_color,
    );
    println!();
    println!("  Next: edit metadata.json, then run `practa validate --plugin {}`", created.display());
    println!();
    Ok(true)
}

/// Run the `practa validate` command.
///
/// Returns `Ok(false)` when the report carries errors.
pub fn run_validate(
    config: &PractaConfig,
    plugin: Option<&Path>,
    json: bool,
    plain: bool,
) -> Result<bool, PractaError> {
    let layout = PluginLayout::from_config(config, plugin);
    let report = layout.validate()?;

    if json {
        output::print_json(&report);
    } else {
        output::print_header(&format!("practa validate: {}", layout.root.display()));
        print_report(&report, output::use_color(plain));
        println!();
    }
    Ok(report.is_valid)
}

/// Run the `practa audit` command.
///
/// Returns `Ok(false)` when the audit found errors.
pub fn run_audit(
    config: &PractaConfig,
    plugin: Option<&Path>,
    json: bool,
    plain: bool,
) -> Result<bool, PractaError> {
    let layout = PluginLayout::from_config(config, plugin);
    let result = AssetAuditor::from_config(config).audit(&layout.root);

    if json {
        output::print_json(&result);
    } else {
        output::print_header(&format!("practa audit: {}", layout.root.display()));
        print_audit(&result, output::use_color(plain));
        println!();
    }
    Ok(result.valid)
}

/// Run the `practa package` command: writes `{id}-{version}.zip` into `out`.
pub fn run_package(
    config: &PractaConfig,
    plugin: Option<&Path>,
    out: &Path,
    plain: bool,
) -> Result<bool, PractaError> {
    let use_color = output::use_color(plain);
    let layout = PluginLayout::from_config(config, plugin);
    output::print_header("practa package");

    let report = layout.validate()?;
    if !report.is_valid {
        print_report(&report, use_color);
        println!();
        return Ok(false);
    }

    let metadata = metadata::read(&layout.metadata_path())?;
    std::fs::create_dir_all(out).map_err(|e| PractaError::io(out, e))?;
    let target = out.join(archive_file_name(&metadata));
    let file = std::fs::File::create(&target).map_err(|e| PractaError::io(&target, e))?;

    let pipeline = PackagingPipeline::new(Arc::new(HttpSubmissionTransport::from_config(
        &config.marketplace,
    )?));
    let name = pipeline.download(&layout.root, &metadata, file)?;

    output::print_line(Mark::Ok, &format!("wrote {name}"), use_color);
    println!("    Path: {}", target.display());
    println!();
    Ok(true)
}

/// Run the `practa submit` command.
///
/// Metadata errors stop before the audit; audit errors are refused by the
/// pipeline before any upload.
pub async fn run_submit(
    config: &PractaConfig,
    plugin: Option<&Path>,
    plain: bool,
) -> Result<bool, PractaError> {
    let use_color = output::use_color(plain);
    let layout = PluginLayout::from_config(config, plugin);
    output::print_header("practa submit");

    let report = layout.validate()?;
    if !report.is_valid {
        print_report(&report, use_color);
        println!();
        return Ok(false);
    }

    let audit = AssetAuditor::from_config(config).audit(&layout.root);
    print_audit(&audit, use_color);

    let metadata = metadata::read(&layout.metadata_path())?;
    let transport = HttpSubmissionTransport::from_config(&config.marketplace)?;
    println!("    Endpoint: {}", transport.endpoint());
    let pipeline = PackagingPipeline::new(Arc::new(transport));
    let receipt = pipeline.submit(&layout.root, &metadata, &audit).await?;

    output::print_line(
        Mark::Ok,
        &format!(
            "submitted {} (HTTP {})",
            archive_file_name(&metadata),
            receipt.status
        ),
        use_color,
    );
    println!();
    Ok(true)
}

fn print_report(report: &ValidationReport, use_color: bool) {
    for item in &report.errors {
        output::print_line(Mark::Fail, &item.message, use_color);
    }
    for item in &report.warnings {
        output::print_line(Mark::Warn, &item.message, use_color);
    }
    for item in &report.successes {
        output::print_line(Mark::Ok, &item.message, use_color);
    }
    println!();
    println!(
        "  {} error(s), {} warning(s)",
        report.errors.len(),
        report.warnings.len()
    );
}

fn print_audit(result: &AssetValidationResult, use_color: bool) {
    for error in &result.errors {
        output::print_line(Mark::Fail, error, use_color);
    }
    for warning in &result.warnings {
        output::print_line(Mark::Warn, warning, use_color);
    }
    let summary = format!(
        "{} file(s), {} total",
        result.file_count,
        format_bytes(result.total_size_bytes)
    );
    let mark = if result.valid { Mark::Ok } else { Mark::Fail };
    output::print_line(mark, &summary, use_color);
}
