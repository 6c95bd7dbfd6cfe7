// SPDX-FileCopyrightText: 2026 Shiftplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Invariants that hold for any directory, catalog, and constraint set.

use std::collections::{HashMap, HashSet};

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use shiftplan_core::{
    Constraint, Gender, GenderRequirement, Position, Preference, Role, TimeSlot, Worker, WorkerId,
};
use shiftplan_engine::shift_times::default_times;
use shiftplan_engine::window::scheduling_window;
use shiftplan_engine::{AssignmentInput, ScoringWeights, generate_assignments};

fn week() -> Vec<NaiveDate> {
    scheduling_window(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap())
}

fn gender() -> impl Strategy<Value = Gender> {
    prop_oneof![
        Just(Gender::Male),
        Just(Gender::Female),
        Just(Gender::Unspecified)
    ]
}

fn workers() -> impl Strategy<Value = Vec<Worker>> {
    prop::collection::vec((gender(), prop::bool::weighted(0.15)), 0..7).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (gender, manager))| {
                let mut w = Worker::new(format!("w{i}"), format!("Worker {i}"), gender);
                if manager {
                    w.role = Role::Manager;
                }
                w
            })
            .collect()
    })
}

fn positions() -> impl Strategy<Value = Vec<Position>> {
    let requirement = prop_oneof![
        Just(GenderRequirement::Any),
        Just(GenderRequirement::Male),
        Just(GenderRequirement::Female)
    ];
    prop::collection::vec((requirement, prop::bool::weighted(0.2)), 1..5).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (req, manual))| {
                let p = Position::new(format!("P{i}")).with_gender(req);
                if manual { p.manual_only() } else { p }
            })
            .collect()
    })
}

fn constraints(worker_count: usize) -> impl Strategy<Value = Vec<Constraint>> {
    let slot = prop_oneof![Just(TimeSlot::First), Just(TimeSlot::Second)];
    prop::collection::vec(
        (0..worker_count.max(1), 0u64..8, slot, any::<bool>()),
        0..12,
    )
    .prop_map(|specs| {
        specs
            .into_iter()
            .map(|(w, day, slot, blocked)| {
                let date = week()[0] + Days::new(day);
                let mut c = Constraint::blocking(WorkerId::new(format!("w{w}")), date, slot, "");
                c.is_blocked = blocked;
                c
            })
            .collect()
    })
}

fn scenario() -> impl Strategy<Value = (Vec<Worker>, Vec<Position>, Vec<Constraint>, u64)> {
    (workers(), positions()).prop_flat_map(|(ws, ps)| {
        let n = ws.len();
        (Just(ws), Just(ps), constraints(n), any::<u64>())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn output_respects_every_eligibility_rule(
        (workers, positions, constraints, seed) in scenario()
    ) {
        let dates = week();
        let prefs = HashMap::new();
        let input = AssignmentInput {
            week_dates: &dates,
            workers: &workers,
            positions: &positions,
            constraints: &constraints,
            preferences: &prefs,
            shift_times: default_times(),
        };
        let out = generate_assignments(&input, &ScoringWeights::default(), Some(seed)).unwrap();

        let by_id: HashMap<&str, &Worker> =
            workers.iter().map(|w| (w.id.as_str(), w)).collect();
        let by_name: HashMap<&str, &Position> =
            positions.iter().map(|p| (p.name.as_str(), p)).collect();
        let mut keys = HashSet::new();

        for shift in &out.shifts {
            let worker = by_id[shift.worker_id.as_str()];
            let position = by_name[shift.station.as_str()];

            // One worker per combination.
            prop_assert!(keys.insert((shift.date, shift.time_slot, shift.station.clone())));
            prop_assert!(worker.is_schedulable());
            prop_assert!(position.auto_assignable);
            prop_assert!(position.gender_requirement.admits(worker.gender));
            prop_assert!(!constraints
                .iter()
                .any(|c| c.blocks(&worker.id, shift.date, shift.time_slot)));

            // Boundary days only carry their own slot.
            if shift.date == dates[0] {
                prop_assert_eq!(shift.time_slot, TimeSlot::First);
            }
            if shift.date == dates[dates.len() - 1] {
                prop_assert_eq!(shift.time_slot, TimeSlot::Second);
            }
        }
    }

    #[test]
    fn same_seed_same_roster((workers, positions, constraints, seed) in scenario()) {
        let dates = week();
        let mut prefs = HashMap::new();
        if let Some(w) = workers.first() {
            prefs.insert(
                w.id.clone(),
                Preference::new(w.id.clone()).with_choices(["P0", "P1"]),
            );
        }
        let input = AssignmentInput {
            week_dates: &dates,
            workers: &workers,
            positions: &positions,
            constraints: &constraints,
            preferences: &prefs,
            shift_times: default_times(),
        };
        let weights = ScoringWeights::default();
        let a = generate_assignments(&input, &weights, Some(seed)).unwrap();
        let b = generate_assignments(&input, &weights, Some(seed)).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn slots_with_a_candidate_are_never_left_empty(
        (workers, positions, _constraints, seed) in scenario()
    ) {
        // Without constraints the only reason to skip a combination is that
        // no schedulable worker passes the gender rule.
        let dates = week();
        let prefs = HashMap::new();
        let input = AssignmentInput {
            week_dates: &dates,
            workers: &workers,
            positions: &positions,
            constraints: &[],
            preferences: &prefs,
            shift_times: default_times(),
        };
        let out = generate_assignments(&input, &ScoringWeights::default(), Some(seed)).unwrap();

        let fillable = positions
            .iter()
            .filter(|p| p.auto_assignable)
            .filter(|p| {
                workers
                    .iter()
                    .any(|w| w.is_schedulable() && p.gender_requirement.admits(w.gender))
            })
            .count();
        // Eight days, two boundary days carry one slot each.
        prop_assert_eq!(out.shifts.len(), fillable * 14);
    }
}
