// SPDX-FileCopyrightText: 2026 Shiftplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use shiftplan_core::{
    Preference, Shift, ShiftId, ShiftStatus, ShiftplanError, StorageAdapter, WorkerId,
};
use shiftplan_engine::roster::{self, RosterGrid, SlotKey};
use shiftplan_engine::window;
use shiftplan_engine::{AssignmentInput, generate_assignments};
use tracing::{info, warn};

use crate::settings::PlannerSettings;

/// Outcome of [`Planner::generate_week`].
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub week_start: NaiveDate,
    /// Shifts produced by this run.
    pub shifts: Vec<Shift>,
    /// Auto-assignable combinations nobody could fill.
    pub unfilled: Vec<SlotKey>,
    /// Seed that reproduces this run.
    pub seed: u64,
    pub dry_run: bool,
    /// The stored week with this run's shifts overlaid. Shifts from earlier
    /// runs for combinations this run left empty are kept.
    pub week: Vec<Shift>,
}

/// A stored week laid out for display.
#[derive(Debug, Clone, Serialize)]
pub struct WeekRoster {
    pub week_start: NaiveDate,
    pub shifts: Vec<Shift>,
    pub grid: RosterGrid,
    pub unfilled: Vec<SlotKey>,
}

/// Runs the weekly workflow against any storage backend.
pub struct Planner<S: StorageAdapter> {
    store: Arc<S>,
    settings: PlannerSettings,
}

impl<S: StorageAdapter> Planner<S> {
    pub fn new(store: Arc<S>, settings: PlannerSettings) -> Self {
        Self { store, settings }
    }

    pub fn settings(&self) -> &PlannerSettings {
        &self.settings
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Start of the week after the one containing `today`.
    pub fn upcoming_week_start(&self, today: NaiveDate) -> NaiveDate {
        window::upcoming_week_start(today, self.settings.week_starts_on)
    }

    /// The boundary-inclusive days of the week starting at `week_start`.
    pub fn week_dates(&self, week_start: NaiveDate) -> Vec<NaiveDate> {
        window::scheduling_window(week_start)
    }

    /// Generate assignments for the week starting at `week_start`.
    ///
    /// `seed` overrides the configured seed. With `dry_run` nothing is
    /// written and the report shows what the week would look like.
    pub async fn generate_week(
        &self,
        week_start: NaiveDate,
        seed: Option<u64>,
        dry_run: bool,
    ) -> Result<GenerationReport, ShiftplanError> {
        let dates = self.week_dates(week_start);
        let (first, last) = bounds(&dates)?;

        if week_start.weekday() != self.settings.week_starts_on {
            warn!(
                %week_start,
                expected = %self.settings.week_starts_on,
                "week start does not fall on the configured weekday"
            );
        }

        let workers = self.store.list_workers().await?;
        let constraints = self.store.constraints_between(first, last).await?;
        let preferences: HashMap<WorkerId, Preference> = self
            .store
            .list_preferences()
            .await?
            .into_iter()
            .map(|p| (p.worker_id.clone(), p))
            .collect();
        self.warn_unknown_choices(&preferences);

        let input = AssignmentInput {
            week_dates: &dates,
            workers: &workers,
            positions: &self.settings.positions,
            constraints: &constraints,
            preferences: &preferences,
            shift_times: self.settings.shift_times,
        };
        let outcome =
            generate_assignments(&input, &self.settings.weights, seed.or(self.settings.seed))?;
        let unfilled = roster::unfilled_slots(&dates, &self.settings.positions, &outcome.shifts);

        let existing = self.store.shifts_between(first, last).await?;
        if !dry_run {
            self.store.upsert_shifts(&outcome.shifts).await?;
        }

        info!(
            %week_start,
            seed = outcome.seed,
            assigned = outcome.shifts.len(),
            unfilled = unfilled.len(),
            dry_run,
            "week generated"
        );

        Ok(GenerationReport {
            week_start,
            week: roster::merge_by_id(existing, outcome.shifts.clone()),
            shifts: outcome.shifts,
            unfilled,
            seed: outcome.seed,
            dry_run,
        })
    }

    /// The stored roster for the week starting at `week_start`.
    pub async fn roster(&self, week_start: NaiveDate) -> Result<WeekRoster, ShiftplanError> {
        let dates = self.week_dates(week_start);
        let (first, last) = bounds(&dates)?;
        let shifts = self.store.shifts_between(first, last).await?;
        Ok(WeekRoster {
            week_start,
            grid: RosterGrid::build(&dates, &self.settings.positions, &shifts),
            unfilled: roster::unfilled_slots(&dates, &self.settings.positions, &shifts),
            shifts,
        })
    }

    /// Approve every assigned shift of the week. Returns how many shifts
    /// changed status; with `dry_run` only counts them.
    pub async fn approve_week(
        &self,
        week_start: NaiveDate,
        dry_run: bool,
    ) -> Result<usize, ShiftplanError> {
        let dates = self.week_dates(week_start);
        let (first, last) = bounds(&dates)?;

        let changed = if dry_run {
            let mut shifts = self.store.shifts_between(first, last).await?;
            roster::approve_all(&mut shifts)
        } else {
            self.store
                .set_status_between(first, last, ShiftStatus::Approved)
                .await?
        };
        info!(%week_start, changed, dry_run, "week approved");
        Ok(changed)
    }

    /// Manually hand a shift to another worker.
    ///
    /// This is a manager override: gender requirements and constraints are
    /// not re-checked. The worker must exist in the directory.
    pub async fn reassign_shift(
        &self,
        shift_id: &ShiftId,
        worker_id: &WorkerId,
    ) -> Result<Shift, ShiftplanError> {
        let worker = self
            .store
            .get_worker(worker_id)
            .await?
            .ok_or_else(|| ShiftplanError::not_found("worker", worker_id.as_str()))?;
        let mut shifts: Vec<Shift> = self
            .store
            .get_shift(shift_id)
            .await?
            .into_iter()
            .collect();

        let updated = roster::reassign(&mut shifts, shift_id, &worker)?.clone();
        self.store
            .update_shift_worker(shift_id, &worker.id, &worker.name)
            .await?;
        info!(shift = %shift_id, worker = %worker.id, "shift reassigned");
        Ok(updated)
    }

    fn warn_unknown_choices(&self, preferences: &HashMap<WorkerId, Preference>) {
        if self.settings.positions.is_empty() {
            warn!("no positions configured; nothing will be assigned");
            return;
        }
        let known: HashSet<&str> = self
            .settings
            .positions
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        for pref in preferences.values() {
            for choice in [&pref.first_choice, &pref.second_choice, &pref.third_choice]
                .into_iter()
                .flatten()
                .filter(|c| !c.trim().is_empty() && !known.contains(c.as_str()))
            {
                warn!(worker = %pref.worker_id, position = %choice, "preferred position is not in the catalog");
            }
        }
    }
}

fn bounds(dates: &[NaiveDate]) -> Result<(NaiveDate, NaiveDate), ShiftplanError> {
    match (dates.first(), dates.last()) {
        (Some(first), Some(last)) => Ok((*first, *last)),
        _ => Err(ShiftplanError::Internal("empty scheduling window".into())),
    }
}
