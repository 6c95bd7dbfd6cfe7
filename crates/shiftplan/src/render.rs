// SPDX-FileCopyrightText: 2026 Shiftplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal and JSON output.
//!
//! Color is used only when stdout is a terminal and `--plain` is not set.
//! Padding is applied before coloring so ANSI codes never skew columns.

use std::io::IsTerminal;

use colored::Colorize;
use serde::Serialize;
use shiftplan_config::ShiftplanConfig;
use shiftplan_core::{Constraint, Preference, ShiftStatus, ShiftplanError, StorageAdapter, Worker};
use shiftplan_engine::{RosterGrid, SlotKey};
use shiftplan_planner::{GenerationReport, Planner, WeekRoster};

pub fn use_color(plain: bool) -> bool {
    !plain && std::io::stdout().is_terminal()
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), ShiftplanError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ShiftplanError::Internal(format!("failed to encode JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

pub fn print_config(config: &ShiftplanConfig) -> Result<(), ShiftplanError> {
    let rendered = toml::to_string_pretty(config)
        .map_err(|e| ShiftplanError::Internal(format!("failed to encode config: {e}")))?;
    print!("{rendered}");
    Ok(())
}

pub fn print_generation<S: StorageAdapter>(
    planner: &Planner<S>,
    report: &GenerationReport,
    color: bool,
) {
    let dates = planner.week_dates(report.week_start);
    let grid = RosterGrid::build(&dates, &planner.settings().positions, &report.week);

    println!();
    println!("  shiftplan generate: week of {}", report.week_start);
    println!("  {}", "-".repeat(50));
    println!(
        "    {} shift(s) assigned, {} unfilled (seed {})",
        report.shifts.len(),
        report.unfilled.len(),
        report.seed
    );
    if report.dry_run {
        let note = "dry run: nothing was saved";
        if color {
            println!("    {}", note.yellow());
        } else {
            println!("    {note}");
        }
    }
    println!();
    print!("{}", format_grid(&grid, color));
    print_unfilled(&report.unfilled, color);
}

pub fn print_roster(roster: &WeekRoster, color: bool) {
    println!();
    println!("  shiftplan roster: week of {}", roster.week_start);
    println!("  {}", "-".repeat(50));
    print!("{}", format_grid(&roster.grid, color));
    print_unfilled(&roster.unfilled, color);
}

fn print_unfilled(unfilled: &[SlotKey], color: bool) {
    if unfilled.is_empty() {
        println!();
        return;
    }
    println!();
    println!("  Unfilled:");
    for key in unfilled {
        let line = format!("    {} {:<6} {}", key.date, key.slot.as_str(), key.position);
        if color {
            println!("{}", line.red());
        } else {
            println!("{line}");
        }
    }
    println!();
}

/// Lay out a roster grid as fixed-width text, one line per position.
pub fn format_grid(grid: &RosterGrid, color: bool) -> String {
    let headers: Vec<String> = grid
        .columns
        .iter()
        .map(|(date, slot)| format!("{} {}", date.format("%a %d"), slot))
        .collect();
    let labels: Vec<String> = grid
        .rows
        .iter()
        .map(|row| {
            if row.manual_only {
                format!("{} (manual)", row.position)
            } else {
                row.position.clone()
            }
        })
        .collect();

    let label_width = labels.iter().map(String::len).max().unwrap_or(0).max(8);
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &grid.rows {
        for (width, cell) in widths.iter_mut().zip(&row.cells) {
            if let Some(cell) = cell {
                *width = (*width).max(cell.worker_name.chars().count());
            }
        }
    }

    let mut out = String::new();
    out.push_str(&format!("    {:<label_width$}", "Position"));
    for (header, width) in headers.iter().zip(&widths) {
        out.push_str(&format!("  {header:<width$}"));
    }
    out.push('\n');

    for (row, label) in grid.rows.iter().zip(&labels) {
        out.push_str(&format!("    {label:<label_width$}"));
        for (cell, width) in row.cells.iter().zip(&widths) {
            let (text, status) = match cell {
                Some(cell) => (cell.worker_name.as_str(), Some(cell.status)),
                None => ("-", None),
            };
            let padded = format!("{text:<width$}");
            let shown = match (color, status) {
                (false, _) => padded,
                (true, Some(ShiftStatus::Approved)) => padded.green().to_string(),
                (true, Some(ShiftStatus::Assigned)) => padded,
                (true, None) if row.manual_only => padded.dimmed().to_string(),
                (true, None) => padded.red().to_string(),
            };
            out.push_str("  ");
            out.push_str(&shown);
        }
        out.push('\n');
    }
    out
}

pub fn print_workers(workers: &[Worker], color: bool) {
    if workers.is_empty() {
        println!("no workers");
        return;
    }
    for worker in workers {
        let line = format!(
            "{:<12} {:<24} {:<12} {}",
            worker.id.as_str(),
            worker.name,
            worker.gender.to_string(),
            worker.role.to_string()
        );
        if color && !worker.is_schedulable() {
            println!("{}", line.dimmed());
        } else {
            println!("{line}");
        }
    }
}

pub fn print_constraints(constraints: &[Constraint]) {
    if constraints.is_empty() {
        println!("no constraints");
        return;
    }
    for c in constraints {
        let state = if c.is_blocked { "blocked" } else { "open" };
        println!(
            "{}  {:<12} {} {:<6} {:<7} {}",
            c.id,
            c.worker_id.as_str(),
            c.date,
            c.time_slot.as_str(),
            state,
            c.reason
        );
    }
}

pub fn print_preference(preference: &Preference) {
    let show = |choice: &Option<String>| choice.clone().unwrap_or_else(|| "-".to_string());
    println!("worker: {}", preference.worker_id);
    println!("  1st:  {}", show(&preference.first_choice));
    println!("  2nd:  {}", show(&preference.second_choice));
    println!("  3rd:  {}", show(&preference.third_choice));
    if !preference.notes.is_empty() {
        println!("  notes: {}", preference.notes);
    }
}
