// SPDX-FileCopyrightText: 2026 Practa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Practa command-line tool.
//!
//! Scaffolds, validates, packages, and submits plugins, runs flows in the
//! terminal, and keeps a checkout in step with the upstream template.

mod flow;
mod output;
mod plugin;
mod sync;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use practa_config::PractaConfig;
use practa_core::PractaError;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "practa", version, about = "Build and share Practa plugins")]
struct Cli {
    /// Configuration file to use instead of the XDG hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new plugin directory.
    Init {
        /// Plugin id (lowercase letters, digits, hyphens).
        id: String,
        /// Parent directory for the new plugin.
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Check plugin metadata and the entry component.
    Validate {
        /// Plugin directory (defaults to `plugin.dir`).
        #[arg(long)]
        plugin: Option<PathBuf>,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Check declared and physical assets.
    Audit {
        /// Plugin directory (defaults to `plugin.dir`).
        #[arg(long)]
        plugin: Option<PathBuf>,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Write the distributable archive to disk.
    Package {
        /// Plugin directory (defaults to `plugin.dir`).
        #[arg(long)]
        plugin: Option<PathBuf>,
        /// Directory the archive is written to.
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Validate, audit, and upload the plugin to the marketplace.
    Submit {
        /// Plugin directory (defaults to `plugin.dir`).
        #[arg(long)]
        plugin: Option<PathBuf>,
    },
    /// Upstream template sync.
    Sync {
        #[command(subcommand)]
        action: SyncCommands,
    },
    /// Step catalog and preset flows.
    Flow {
        #[command(subcommand)]
        action: FlowCommands,
    },
}

#[derive(Subcommand)]
enum SyncCommands {
    /// Compare this checkout with the upstream template.
    Status {
        /// Print the state as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Pull upstream template files into this checkout.
    Update,
}

#[derive(Subcommand)]
enum FlowCommands {
    /// List step kinds, optionally filtered.
    Types {
        /// Matches tag, name, or description.
        query: Option<String>,
    },
    /// Show a preset flow, or list presets when no key is given.
    Preset {
        key: Option<String>,
        /// Print the flow definition as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Run a preset flow in the terminal.
    Run { key: String },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => practa_config::load_and_validate_path(path),
        None => practa_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            practa_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.general.log_level);

    match dispatch(cli.command, &config, cli.plain).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}

/// Runs one command. `Ok(false)` means the command ran but found problems.
async fn dispatch(command: Commands, config: &PractaConfig, plain: bool) -> Result<bool, PractaError> {
    match command {
        Commands::Init { id, dir } => plugin::run_init(&id, &dir, plain),
        Commands::Validate { plugin, json } => {
            plugin::run_validate(config, plugin.as_deref(), json, plain)
        }
        Commands::Audit { plugin, json } => plugin::run_audit(config, plugin.as_deref(), json, plain),
        Commands::Package { plugin, out } => {
            plugin::run_package(config, plugin.as_deref(), &out, plain)
        }
        Commands::Submit { plugin } => plugin::run_submit(config, plugin.as_deref(), plain).await,
        Commands::Sync { action } => match action {
            SyncCommands::Status { json } => sync::run_status(config, json, plain).await,
            SyncCommands::Update => sync::run_update(config, plain).await,
        },
        Commands::Flow { action } => match action {
            FlowCommands::Types { query } => flow::run_types(query.as_deref()),
            FlowCommands::Preset { key, json } => flow::run_preset(key.as_deref(), json),
            FlowCommands::Run { key } => flow::run_preset_flow(&key, plain).await,
        },
    }
}

/// Logs go to stderr so `--json` output stays clean.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "practa={log_level},practa_flow={log_level},practa_package={log_level},practa_sync={log_level},warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["practa", "validate", "--plugin", "p", "--plain"]).unwrap();
        assert!(cli.plain);
        match cli.command {
            Commands::Validate { plugin, json } => {
                assert_eq!(plugin, Some(PathBuf::from("p")));
                assert!(!json);
            }
            _ => panic!("expected validate"),
        }
    }

    #[test]
    fn init_defaults_to_current_dir() {
        let cli = Cli::try_parse_from(["practa", "init", "calm-tide"]).unwrap();
        match cli.command {
            Commands::Init { id, dir } => {
                assert_eq!(id, "calm-tide");
                assert_eq!(dir, PathBuf::from("."));
            }
            _ => panic!("expected init"),
        }
    }

    #[test]
    fn nested_sync_and_flow_commands_parse() {
        let cli = Cli::try_parse_from(["practa", "sync", "status", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Sync {
                action: SyncCommands::Status { json: true }
            }
        ));

        let cli = Cli::try_parse_from(["practa", "flow", "preset"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Flow {
                action: FlowCommands::Preset { key: None, json: false }
            }
        ));
    }

    #[test]
    fn missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["practa"]).is_err());
        assert!(Cli::try_parse_from(["practa", "sync"]).is_err());
    }
}
