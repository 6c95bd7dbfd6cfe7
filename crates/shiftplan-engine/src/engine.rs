// SPDX-FileCopyrightText: 2026 Shiftplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The weekly auto-assignment pass.
//!
//! For every (date, slot) of the window and every auto-assignable position
//! in catalog order, the pass collects the eligible candidates, scores
//! them, and assigns the best one. There is no backtracking: an earlier
//! choice is never revisited to make room for a later one. A combination
//! with no eligible candidate is skipped and simply absent from the output.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use shiftplan_core::{
    Constraint, Position, Preference, Shift, ShiftId, ShiftStatus, ShiftTimes, ShiftplanError,
    TimeSlot, Worker, WorkerId,
};
use tracing::{debug, info};

use crate::fairness::FairnessLedger;
use crate::scoring::{self, ScoringWeights};
use crate::window;

/// Everything one run needs, borrowed from the caller.
#[derive(Debug, Clone, Copy)]
pub struct AssignmentInput<'a> {
    /// Boundary-inclusive, strictly ascending dates to schedule.
    pub week_dates: &'a [NaiveDate],
    /// Directory entries. Non-worker roles are ignored.
    pub workers: &'a [Worker],
    /// Position catalog, in the order positions are filled.
    pub positions: &'a [Position],
    pub constraints: &'a [Constraint],
    pub preferences: &'a HashMap<WorkerId, Preference>,
    pub shift_times: ShiftTimes,
}

/// Result of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentOutcome {
    /// One shift per filled (date, slot, position), in processing order.
    pub shifts: Vec<Shift>,
    /// Seed the tie-breaker was drawn from. Passing it back in reproduces
    /// the run exactly.
    pub seed: u64,
}

/// Fill the roster for `input`.
///
/// With `seed = None` a random seed is drawn and reported in the outcome.
/// Fails only on malformed input: invalid weights, dates out of order, or
/// duplicate position names.
pub fn generate_assignments(
    input: &AssignmentInput<'_>,
    weights: &ScoringWeights,
    seed: Option<u64>,
) -> Result<AssignmentOutcome, ShiftplanError> {
    weights.validate()?;
    check_dates(input.week_dates)?;
    check_positions(input.positions)?;

    let seed = seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut ledger = FairnessLedger::new();

    let blocked: HashSet<(&WorkerId, NaiveDate, TimeSlot)> = input
        .constraints
        .iter()
        .filter(|c| c.is_blocked)
        .map(|c| (&c.worker_id, c.date, c.time_slot))
        .collect();
    let pool: Vec<&Worker> = input.workers.iter().filter(|w| w.is_schedulable()).collect();

    let mut shifts = Vec::new();
    let mut unfilled = 0usize;

    for (date, slot) in window::expand(input.week_dates) {
        let times = input.shift_times.for_slot(slot);

        for position in input.positions.iter().filter(|p| p.auto_assignable) {
            let mut best: Option<(&Worker, f64)> = None;

            for worker in pool.iter().copied().filter(|w| {
                !blocked.contains(&(&w.id, date, slot))
                    && position.gender_requirement.admits(w.gender)
            }) {
                let breakdown = scoring::score(
                    worker,
                    position,
                    &ledger,
                    input.preferences.get(&worker.id),
                    weights,
                );
                let total = breakdown.total() + weights.sample_jitter(&mut rng);
                // Strictly greater: on an exact tie the earlier candidate keeps the slot.
                if best.is_none_or(|(_, top)| total > top) {
                    best = Some((worker, total));
                }
            }

            let Some((worker, total)) = best else {
                unfilled += 1;
                debug!(%date, %slot, position = %position.name, "no eligible candidate");
                continue;
            };

            let tally = ledger.record(&worker.id, &position.name);
            debug!(
                %date,
                %slot,
                position = %position.name,
                worker = %worker.id,
                score = total,
                tally,
                "assigned"
            );

            shifts.push(Shift {
                id: ShiftId::for_key(date, &position.name, slot),
                date,
                time_slot: slot,
                start_time: times.start,
                end_time: times.end,
                station: position.name.clone(),
                worker_id: worker.id.clone(),
                worker_name: worker.name.clone(),
                status: ShiftStatus::Assigned,
            });
        }
    }

    info!(
        seed,
        days = input.week_dates.len(),
        candidates = pool.len(),
        filled = shifts.len(),
        unfilled,
        "assignment pass complete"
    );

    Ok(AssignmentOutcome { shifts, seed })
}

fn check_dates(dates: &[NaiveDate]) -> Result<(), ShiftplanError> {
    if let Some(pair) = dates.windows(2).find(|pair| pair[0] >= pair[1]) {
        return Err(ShiftplanError::InvalidInput(format!(
            "week dates must be strictly ascending, found {} before {}",
            pair[0], pair[1]
        )));
    }
    Ok(())
}

fn check_positions(positions: &[Position]) -> Result<(), ShiftplanError> {
    let mut seen = HashSet::new();
    for position in positions {
        if position.name.trim().is_empty() {
            return Err(ShiftplanError::InvalidInput(
                "position names must not be empty".to_string(),
            ));
        }
        if !seen.insert(position.name.as_str()) {
            return Err(ShiftplanError::InvalidInput(format!(
                "duplicate position `{}` in catalog",
                position.name
            )));
        }
    }
    Ok(())
}
