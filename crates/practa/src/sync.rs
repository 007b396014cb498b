// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `practa sync status | update` command implementations.

use std::sync::Arc;

use practa_config::PractaConfig;
use practa_core::PractaError;
use practa_sync::{
    GitHubUpstream, SyncRole, TemplateSyncState, TemplateSyncTracker, TrackerOptions,
};

use crate::output::{self, Mark};

fn tracker(config: &PractaConfig) -> Result<TemplateSyncTracker, PractaError> {
    let upstream = GitHubUpstream::from_config(&config.template)?;
    Ok(TemplateSyncTracker::new(
        Arc::new(upstream),
        TrackerOptions::from_config(config),
    ))
}

/// Run the `practa sync status` command.
///
/// An unreachable upstream is reported, not treated as a failure.
pub async fn run_status(config: &PractaConfig, json: bool, plain: bool) -> Result<bool, PractaError> {
    let state = tracker(config)?.status().await;

    if json {
        output::print_json(&state);
    } else {
        print_state(config, &state, output::use_color(plain));
    }
    Ok(true)
}

/// Run the `practa sync update` command.
///
/// Only forks pull from the template; an owner checkout is the template.
pub async fn run_update(config: &PractaConfig, plain: bool) -> Result<bool, PractaError> {
    let use_color = output::use_color(plain);
    let tracker = tracker(config)?;
    output::print_header("practa sync update");

    if tracker.role() == SyncRole::Owner {
        output::print_line(
            Mark::Warn,
            "this checkout owns the template; push to update it instead",
            use_color,
        );
        println!();
        return Ok(false);
    }

    let report = tracker.update().await?;
    for path in &report.skipped {
        output::print_line(Mark::Warn, &format!("kept local {path}"), use_color);
    }
    output::print_line(
        Mark::Ok,
        &format!(
            "{} file(s) updated to {}",
            report.written.len(),
            short_sha(&report.commit)
        ),
        use_color,
    );
    println!();
    Ok(true)
}

fn print_state(config: &PractaConfig, state: &TemplateSyncState, use_color: bool) {
    output::print_header("practa sync status");
    println!(
        "    Template: {}/{} ({})",
        config.template.owner, config.template.repo, state.role
    );

    if !state.available {
        let reason = state.reason.as_deref().unwrap_or("unknown error");
        output::print_line(Mark::Warn, &format!("status unavailable: {reason}"), use_color);
        println!();
        return;
    }

    let local = state.local_commit.as_deref().map(short_sha).unwrap_or("-");
    let latest = state.latest_commit.as_deref().map(short_sha).unwrap_or("-");
    println!("    Local:    {local} {}", state.local_version.as_deref().unwrap_or(""));
    println!("    Upstream: {latest} {}", state.latest_version.as_deref().unwrap_or(""));

    if state.seeded {
        output::print_line(Mark::Ok, "recorded upstream head as baseline", use_color);
    }
    if state.is_in_sync {
        output::print_line(Mark::Ok, "in sync with upstream", use_color);
    } else {
        output::print_line(Mark::Warn, "out of sync with upstream", use_color);
    }
    if state.update_available {
        println!();
        println!("  Update with: practa sync update");
    }
    println!();
}

fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}
