// SPDX-FileCopyrightText: 2026 Shiftplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Clock times for the abstract slot labels.
//!
//! Managers pick the first slot's range; the second slot follows from a
//! fixed rotation table. Unknown first-slot ranges fall back to the default
//! second slot instead of failing. Any other malformed input fails fast.

use shiftplan_core::{ClockTime, ShiftTime, ShiftTimes, ShiftplanError, TimeSlot};

/// First-slot range used when nothing is configured.
pub const DEFAULT_FIRST: ShiftTime = ShiftTime::new(ClockTime::hm(20, 0), ClockTime::hm(0, 0));

/// Second-slot range used when the first slot is not in the rotation table.
pub const DEFAULT_SECOND: ShiftTime = ShiftTime::new(ClockTime::hm(8, 0), ClockTime::hm(12, 0));

/// (first start hour, first end hour) -> derived second slot.
const ROTATION: [((u16, u16), ShiftTime); 3] = [
    ((20, 0), DEFAULT_SECOND),
    (
        (0, 4),
        ShiftTime::new(ClockTime::hm(12, 0), ClockTime::hm(16, 0)),
    ),
    (
        (4, 8),
        ShiftTime::new(ClockTime::hm(16, 0), ClockTime::hm(20, 0)),
    ),
];

/// Second-slot range paired with `first` in the rotation table.
///
/// Matching is on the start and end hours, so `20:30-00:00` rotates the
/// same way as `20:00-00:00`.
pub fn derive_second_slot(first: ShiftTime) -> ShiftTime {
    let key = (first.start.hour(), first.end.hour());
    ROTATION
        .iter()
        .find(|(hours, _)| *hours == key)
        .map(|(_, second)| *second)
        .unwrap_or(DEFAULT_SECOND)
}

/// Full slot timing derived from the first slot.
pub fn from_first(first: ShiftTime) -> ShiftTimes {
    ShiftTimes {
        first,
        second: derive_second_slot(first),
    }
}

/// `20:00-00:00` followed by `08:00-12:00`.
pub fn default_times() -> ShiftTimes {
    from_first(DEFAULT_FIRST)
}

/// Build slot timing from labelled entries such as `("first", 20:00-00:00)`.
///
/// Labels go through the [`TimeSlot`] parser, so legacy `evening`/`morning`
/// labels are accepted. An unknown label, a repeated slot, or a missing
/// first slot is rejected. A missing second slot is derived from the first.
pub fn from_labels<'a, I>(entries: I) -> Result<ShiftTimes, ShiftplanError>
where
    I: IntoIterator<Item = (&'a str, ShiftTime)>,
{
    let mut first = None;
    let mut second = None;

    for (label, range) in entries {
        let target = match label.parse::<TimeSlot>()? {
            TimeSlot::First => &mut first,
            TimeSlot::Second => &mut second,
        };
        if target.replace(range).is_some() {
            return Err(ShiftplanError::InvalidInput(format!(
                "slot `{label}` configured more than once"
            )));
        }
    }

    let first =
        first.ok_or_else(|| ShiftplanError::unrecognized("shift times", "missing first slot"))?;
    Ok(ShiftTimes {
        first,
        second: second.unwrap_or_else(|| derive_second_slot(first)),
    })
}
