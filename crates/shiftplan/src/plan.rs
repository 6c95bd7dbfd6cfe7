// SPDX-FileCopyrightText: 2026 Shiftplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `shiftplan generate|roster|approve|reassign` command implementations.

use chrono::{Local, NaiveDate};
use serde::Serialize;
use shiftplan_core::{ShiftId, ShiftplanError, StorageAdapter, WorkerId};
use shiftplan_planner::Planner;

use crate::render;
use crate::{Commands, OutputMode, WeekArg};

/// Structured output of `approve --json`.
#[derive(Debug, Serialize)]
struct ApproveResponse {
    week_start: NaiveDate,
    approved: usize,
    dry_run: bool,
}

/// Run one of the planning commands.
pub async fn run<S: StorageAdapter>(
    planner: &Planner<S>,
    command: Commands,
    output: OutputMode,
) -> Result<(), ShiftplanError> {
    match command {
        Commands::Generate {
            week,
            seed,
            dry_run,
        } => {
            let week_start = resolve_week(planner, &week);
            let report = planner.generate_week(week_start, seed, dry_run).await?;
            if output.json {
                render::print_json(&report)
            } else {
                render::print_generation(planner, &report, output.color);
                Ok(())
            }
        }
        Commands::Roster { week } => {
            let roster = planner.roster(resolve_week(planner, &week)).await?;
            if output.json {
                render::print_json(&roster)
            } else {
                render::print_roster(&roster, output.color);
                Ok(())
            }
        }
        Commands::Approve { week, dry_run } => {
            let week_start = resolve_week(planner, &week);
            let approved = planner.approve_week(week_start, dry_run).await?;
            if output.json {
                render::print_json(&ApproveResponse {
                    week_start,
                    approved,
                    dry_run,
                })
            } else {
                let verb = if dry_run { "would approve" } else { "approved" };
                println!("{verb} {approved} shift(s) for the week of {week_start}");
                Ok(())
            }
        }
        Commands::Reassign {
            shift_id,
            worker_id,
        } => {
            let shift = planner
                .reassign_shift(&ShiftId(shift_id), &WorkerId::new(worker_id))
                .await?;
            if output.json {
                render::print_json(&shift)
            } else {
                println!(
                    "{} {} {} -> {}",
                    shift.date, shift.time_slot, shift.station, shift.worker_name
                );
                Ok(())
            }
        }
        other => Err(ShiftplanError::Internal(format!(
            "not a planning command: {other:?}"
        ))),
    }
}

fn resolve_week<S: StorageAdapter>(planner: &Planner<S>, week: &WeekArg) -> NaiveDate {
    week.week
        .unwrap_or_else(|| planner.upcoming_week_start(Local::now().date_naive()))
}
