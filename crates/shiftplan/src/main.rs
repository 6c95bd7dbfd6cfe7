// SPDX-FileCopyrightText: 2026 Shiftplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shiftplan - weekly shift auto-assignment.
//!
//! This is the binary entry point for the scheduler.

mod directory;
mod plan;
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use shiftplan_config::ShiftplanConfig;
use shiftplan_core::{Gender, ShiftplanError, StorageAdapter, TimeSlot};
use shiftplan_planner::{Planner, PlannerSettings};
use shiftplan_storage::SqliteStorage;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Shiftplan - weekly shift auto-assignment.
#[derive(Parser, Debug)]
#[command(name = "shiftplan", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Emit JSON instead of human-readable output.
    #[arg(long, global = true)]
    json: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Auto-assign the shifts of a week.
    Generate {
        #[command(flatten)]
        week: WeekArg,
        /// Seed for tie-breaking jitter; reuse a reported seed to reproduce a run.
        #[arg(long)]
        seed: Option<u64>,
        /// Show the result without saving it.
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the stored roster of a week.
    Roster {
        #[command(flatten)]
        week: WeekArg,
    },
    /// Approve every assigned shift of a week.
    Approve {
        #[command(flatten)]
        week: WeekArg,
        /// Count the shifts that would change without saving.
        #[arg(long)]
        dry_run: bool,
    },
    /// Hand a shift to another worker.
    Reassign {
        /// Shift id, as shown by `roster --json`.
        shift_id: String,
        worker_id: String,
    },
    /// Manage the worker directory.
    #[command(subcommand)]
    Worker(WorkerCommand),
    /// Manage availability constraints.
    #[command(subcommand)]
    Constraint(ConstraintCommand),
    /// Manage position preferences.
    #[command(subcommand)]
    Preference(PreferenceCommand),
    /// Print the resolved configuration.
    Config,
}

#[derive(Args, Debug)]
struct WeekArg {
    /// First day of the week (YYYY-MM-DD). Defaults to the upcoming week.
    #[arg(long, value_name = "DATE")]
    week: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
enum WorkerCommand {
    /// Add a worker, or update one with the same id.
    Add {
        id: String,
        name: String,
        #[arg(long, default_value = "unspecified")]
        gender: Gender,
        /// Register as a manager; managers are never auto-assigned.
        #[arg(long)]
        manager: bool,
    },
    List,
    /// Remove a worker together with their constraints and preferences.
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
enum ConstraintCommand {
    /// Block a worker from a slot.
    Add {
        worker_id: String,
        date: NaiveDate,
        slot: TimeSlot,
        #[arg(long, default_value = "")]
        reason: String,
    },
    List {
        /// Only show this worker's constraints.
        #[arg(long)]
        worker: Option<String>,
    },
    Remove { id: String },
}

#[derive(Subcommand, Debug)]
enum PreferenceCommand {
    /// Record a worker's ranked position choices.
    Set {
        worker_id: String,
        #[arg(long)]
        first: Option<String>,
        #[arg(long)]
        second: Option<String>,
        #[arg(long)]
        third: Option<String>,
        #[arg(long, default_value = "")]
        notes: String,
    },
    Show { worker_id: String },
}

/// Output switches shared by every command.
#[derive(Debug, Clone, Copy)]
pub struct OutputMode {
    pub json: bool,
    pub color: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => shiftplan_config::load_and_validate_path(path),
        None => shiftplan_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            shiftplan_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.app.log_level);

    let output = OutputMode {
        json: cli.json,
        color: render::use_color(cli.plain),
    };

    if let Err(e) = run(cli.command, &config, output).await {
        eprintln!("shiftplan: {e}");
        std::process::exit(1);
    }
}

/// Initialise the global subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("shiftplan={log_level},warn")));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(
    command: Commands,
    config: &ShiftplanConfig,
    output: OutputMode,
) -> Result<(), ShiftplanError> {
    if matches!(command, Commands::Config) {
        return render::print_config(config);
    }

    info!(
        path = %config.storage.database_path,
        wal = config.storage.wal_mode,
        "opening storage"
    );
    let storage = Arc::new(SqliteStorage::new(config.storage.clone()));
    storage.initialize().await?;

    debug!(?command, "dispatching");
    let result = dispatch(command, config, Arc::clone(&storage), output).await;
    let closed = storage.close().await;
    match &closed {
        Ok(()) => debug!("storage closed"),
        Err(e) => warn!(error = %e, "storage did not close cleanly"),
    }
    result.and(closed)
}

async fn dispatch(
    command: Commands,
    config: &ShiftplanConfig,
    storage: Arc<SqliteStorage>,
    output: OutputMode,
) -> Result<(), ShiftplanError> {
    match command {
        Commands::Worker(cmd) => directory::run_worker(storage.as_ref(), cmd, output).await,
        Commands::Constraint(cmd) => {
            directory::run_constraint(storage.as_ref(), cmd, output).await
        }
        Commands::Preference(cmd) => {
            directory::run_preference(storage.as_ref(), cmd, output).await
        }
        planning => {
            let planner = Planner::new(storage, PlannerSettings::from_config(config)?);
            plan::run(&planner, planning, output).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_flags_parse() {
        let cli = Cli::try_parse_from([
            "shiftplan",
            "generate",
            "--week",
            "2026-03-01",
            "--seed",
            "7",
            "--dry-run",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Generate {
                week,
                seed,
                dry_run,
            } => {
                assert_eq!(week.week, NaiveDate::from_ymd_opt(2026, 3, 1));
                assert_eq!(seed, Some(7));
                assert!(dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn slot_labels_parse_through_the_legacy_adapter() {
        let cli = Cli::try_parse_from([
            "shiftplan",
            "constraint",
            "add",
            "w1",
            "2026-03-02",
            "evening",
        ])
        .unwrap();
        match cli.command {
            Commands::Constraint(ConstraintCommand::Add { slot, .. }) => {
                assert_eq!(slot, TimeSlot::First);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn unknown_gender_is_rejected() {
        assert!(
            Cli::try_parse_from(["shiftplan", "worker", "add", "w1", "Dana", "--gender", "x"])
                .is_err()
        );
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = shiftplan_config::load_and_validate_str("").expect("defaults are valid");
        assert_eq!(config.app.log_level, "info");
    }
}
