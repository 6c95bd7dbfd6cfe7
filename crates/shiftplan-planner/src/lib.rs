// SPDX-FileCopyrightText: 2026 Shiftplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Week planning workflow.
//!
//! The planner is the only place that connects the pure assignment engine
//! to storage: it loads the week's inputs through the repository traits,
//! runs the engine, and persists the result.

mod planner;
mod settings;

pub use planner::{GenerationReport, Planner, WeekRoster};
pub use settings::PlannerSettings;
