// SPDX-FileCopyrightText: 2026 Shiftplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scheduling windows and the slots each day offers.
//!
//! A week is modelled as eight boundary-inclusive days. The first day has
//! no slot "before" the window, so it only offers [`TimeSlot::First`]; the
//! last day has no slot "after" it, so it only offers [`TimeSlot::Second`].

use chrono::{Datelike, Days, NaiveDate, Weekday};
use shiftplan_core::TimeSlot;

/// Number of calendar days in a scheduling window (week plus boundary day).
pub const WINDOW_DAYS: usize = 8;

const BOTH: &[TimeSlot] = &[TimeSlot::First, TimeSlot::Second];
const FIRST_ONLY: &[TimeSlot] = &[TimeSlot::First];
const SECOND_ONLY: &[TimeSlot] = &[TimeSlot::Second];

/// The eight days starting at `week_start`.
pub fn scheduling_window(week_start: NaiveDate) -> Vec<NaiveDate> {
    week_start.iter_days().take(WINDOW_DAYS).collect()
}

/// Slots offered on the day at `index` of a window of `len` days.
///
/// A single-day window has no distinct boundaries and offers both slots.
pub fn slots_for_day(index: usize, len: usize) -> &'static [TimeSlot] {
    if len <= 1 {
        BOTH
    } else if index == 0 {
        FIRST_ONLY
    } else if index + 1 == len {
        SECOND_ONLY
    } else {
        BOTH
    }
}

/// Every (date, slot) pair of `dates`, in date order then slot order.
pub fn expand(dates: &[NaiveDate]) -> Vec<(NaiveDate, TimeSlot)> {
    dates
        .iter()
        .enumerate()
        .flat_map(|(i, date)| {
            slots_for_day(i, dates.len())
                .iter()
                .map(move |slot| (*date, *slot))
        })
        .collect()
}

/// The most recent `week_starts_on` day at or before `date`.
pub fn week_start_on_or_before(date: NaiveDate, week_starts_on: Weekday) -> NaiveDate {
    let back = (7 + date.weekday().num_days_from_monday()
        - week_starts_on.num_days_from_monday())
        % 7;
    date - Days::new(u64::from(back))
}

/// Start of the week after the one containing `today`.
pub fn upcoming_week_start(today: NaiveDate, week_starts_on: Weekday) -> NaiveDate {
    week_start_on_or_before(today + Days::new(7), week_starts_on)
}
