// SPDX-FileCopyrightText: 2026 Shiftplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Operations on a generated roster.
//!
//! Manual overrides are manager-privileged and deliberately skip the
//! gender and constraint checks the engine applies.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;
use shiftplan_core::{Position, Shift, ShiftId, ShiftStatus, ShiftplanError, TimeSlot, Worker};

use crate::window;

/// Point the shift `shift_id` at `worker`.
pub fn reassign<'a>(
    shifts: &'a mut [Shift],
    shift_id: &ShiftId,
    worker: &Worker,
) -> Result<&'a Shift, ShiftplanError> {
    let shift = shifts
        .iter_mut()
        .find(|s| &s.id == shift_id)
        .ok_or_else(|| ShiftplanError::not_found("shift", shift_id.as_str()))?;
    shift.worker_id = worker.id.clone();
    shift.worker_name = worker.name.clone();
    Ok(shift)
}

/// Flip every `assigned` shift to `approved`. Returns how many changed, so
/// a second call returns zero.
pub fn approve_all(shifts: &mut [Shift]) -> usize {
    let mut changed = 0;
    for shift in shifts.iter_mut().filter(|s| s.status == ShiftStatus::Assigned) {
        shift.status = ShiftStatus::Approved;
        changed += 1;
    }
    changed
}

/// Overlay `generated` onto `existing`, replacing shifts with the same id
/// in place and appending new ones.
pub fn merge_by_id(mut existing: Vec<Shift>, generated: Vec<Shift>) -> Vec<Shift> {
    let index: HashMap<ShiftId, usize> = existing
        .iter()
        .enumerate()
        .map(|(i, s)| (s.id.clone(), i))
        .collect();
    for shift in generated {
        match index.get(&shift.id) {
            Some(&i) => existing[i] = shift,
            None => existing.push(shift),
        }
    }
    existing
}

/// A (date, slot, position) combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SlotKey {
    pub date: NaiveDate,
    pub slot: TimeSlot,
    pub position: String,
}

/// Auto-assignable combinations of the window that have no shift.
pub fn unfilled_slots(
    week_dates: &[NaiveDate],
    positions: &[Position],
    shifts: &[Shift],
) -> Vec<SlotKey> {
    let filled: HashSet<(NaiveDate, TimeSlot, &str)> = shifts
        .iter()
        .map(|s| (s.date, s.time_slot, s.station.as_str()))
        .collect();

    window::expand(week_dates)
        .into_iter()
        .flat_map(|(date, slot)| {
            positions
                .iter()
                .filter(|p| p.auto_assignable)
                .map(move |p| (date, slot, p))
        })
        .filter(|(date, slot, p)| !filled.contains(&(*date, *slot, p.name.as_str())))
        .map(|(date, slot, p)| SlotKey {
            date,
            slot,
            position: p.name.clone(),
        })
        .collect()
}

/// One filled cell of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterCell {
    pub shift_id: ShiftId,
    pub worker_id: String,
    pub worker_name: String,
    pub status: ShiftStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterRow {
    pub position: String,
    pub manual_only: bool,
    /// Aligned with [`RosterGrid::columns`]; `None` means unassigned.
    pub cells: Vec<Option<RosterCell>>,
}

/// Position rows by (date, slot) columns, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterGrid {
    pub columns: Vec<(NaiveDate, TimeSlot)>,
    pub rows: Vec<RosterRow>,
}

impl RosterGrid {
    /// Lay `shifts` out over the window. Catalog positions come first in
    /// catalog order; stations found only in `shifts` (for example after the
    /// catalog was edited) follow in name order. Shifts outside the window's
    /// columns are not shown.
    pub fn build(week_dates: &[NaiveDate], positions: &[Position], shifts: &[Shift]) -> Self {
        let columns = window::expand(week_dates);
        let column_of: HashMap<(NaiveDate, TimeSlot), usize> = columns
            .iter()
            .enumerate()
            .map(|(i, key)| (*key, i))
            .collect();

        let mut rows: Vec<RosterRow> = positions
            .iter()
            .map(|p| RosterRow {
                position: p.name.clone(),
                manual_only: !p.auto_assignable,
                cells: vec![None; columns.len()],
            })
            .collect();

        let mut extra: Vec<&str> = shifts
            .iter()
            .map(|s| s.station.as_str())
            .filter(|station| !positions.iter().any(|p| p.name == *station))
            .collect();
        extra.sort_unstable();
        extra.dedup();
        rows.extend(extra.into_iter().map(|station| RosterRow {
            position: station.to_string(),
            manual_only: false,
            cells: vec![None; columns.len()],
        }));

        let row_of: HashMap<String, usize> = rows
            .iter()
            .enumerate()
            .map(|(i, r)| (r.position.clone(), i))
            .collect();

        for shift in shifts {
            let (Some(&col), Some(&row)) = (
                column_of.get(&(shift.date, shift.time_slot)),
                row_of.get(&shift.station),
            ) else {
                continue;
            };
            rows[row].cells[col] = Some(RosterCell {
                shift_id: shift.id.clone(),
                worker_id: shift.worker_id.to_string(),
                worker_name: shift.worker_name.clone(),
                status: shift.status,
            });
        }

        Self { columns, rows }
    }

    /// Number of empty cells across all rows.
    pub fn unassigned_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .filter(|c| c.is_none())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiftplan_core::{ClockTime, Gender, WorkerId};

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn shift(day: u32, slot: TimeSlot, station: &str, worker: &str) -> Shift {
        Shift {
            id: ShiftId::for_key(d(day), station, slot),
            date: d(day),
            time_slot: slot,
            start_time: ClockTime::hm(8, 0),
            end_time: ClockTime::hm(12, 0),
            station: station.to_string(),
            worker_id: WorkerId::new(worker),
            worker_name: worker.to_uppercase(),
            status: ShiftStatus::Assigned,
        }
    }

    #[test]
    fn reassign_skips_eligibility_checks() {
        let mut shifts = vec![shift(1, TimeSlot::First, "Gate", "a")];
        let id = shifts[0].id.clone();
        let other = Worker::new("z", "Zohar", Gender::Unspecified);

        let updated = reassign(&mut shifts, &id, &other).unwrap();
        assert_eq!(updated.worker_id.as_str(), "z");
        assert_eq!(updated.worker_name, "Zohar");
        // Everything else about the shift is untouched.
        assert_eq!(shifts[0].station, "Gate");
        assert_eq!(shifts[0].status, ShiftStatus::Assigned);
    }

    #[test]
    fn reassign_unknown_shift_is_not_found() {
        let mut shifts = vec![shift(1, TimeSlot::First, "Gate", "a")];
        let err = reassign(
            &mut shifts,
            &ShiftId("nope".into()),
            &Worker::new("z", "Z", Gender::Male),
        )
        .unwrap_err();
        assert!(matches!(err, ShiftplanError::NotFound { entity: "shift", .. }));
    }

    #[test]
    fn approve_all_is_idempotent() {
        let mut shifts = vec![
            shift(1, TimeSlot::First, "Gate", "a"),
            shift(2, TimeSlot::First, "Gate", "b"),
        ];
        let snapshot = shifts.clone();
        assert_eq!(approve_all(&mut shifts), 2);
        assert!(shifts.iter().all(|s| s.status == ShiftStatus::Approved));
        assert_eq!(approve_all(&mut shifts), 0);
        for (before, after) in snapshot.iter().zip(&shifts) {
            assert_eq!(before.worker_id, after.worker_id);
            assert_eq!(before.id, after.id);
        }
    }

    #[test]
    fn merge_overwrites_same_key() {
        let existing = vec![
            shift(1, TimeSlot::First, "Gate", "a"),
            shift(2, TimeSlot::First, "Gate", "a"),
        ];
        let generated = vec![
            shift(2, TimeSlot::First, "Gate", "b"),
            shift(3, TimeSlot::First, "Gate", "b"),
        ];
        let merged = merge_by_id(existing, generated);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].worker_id.as_str(), "a");
        assert_eq!(merged[1].worker_id.as_str(), "b");
        assert_eq!(merged[2].date, d(3));
    }

    #[test]
    fn unfilled_lists_missing_auto_positions_only() {
        let positions = vec![Position::new("Gate"), Position::new("Reserve").manual_only()];
        let shifts = vec![shift(1, TimeSlot::First, "Gate", "a")];
        let missing = unfilled_slots(&[d(1), d(2)], &positions, &shifts);
        assert_eq!(
            missing,
            vec![SlotKey {
                date: d(2),
                slot: TimeSlot::Second,
                position: "Gate".to_string(),
            }]
        );
    }

    #[test]
    fn grid_places_shifts_and_keeps_gaps() {
        let positions = vec![Position::new("Gate"), Position::new("Reserve").manual_only()];
        let shifts = vec![
            shift(1, TimeSlot::First, "Gate", "a"),
            shift(2, TimeSlot::Second, "Patrol", "b"),
        ];
        let grid = RosterGrid::build(&[d(1), d(2)], &positions, &shifts);

        assert_eq!(grid.columns.len(), 2);
        assert_eq!(grid.rows.len(), 3);
        assert_eq!(grid.rows[0].position, "Gate");
        assert!(grid.rows[1].manual_only);
        assert_eq!(grid.rows[2].position, "Patrol");
        assert_eq!(
            grid.rows[0].cells[0].as_ref().map(|c| c.worker_name.as_str()),
            Some("A")
        );
        assert!(grid.rows[0].cells[1].is_none());
        assert!(grid.rows[2].cells[1].is_some());
        assert_eq!(grid.unassigned_count(), 4);
    }
}
