// SPDX-FileCopyrightText: 2026 Shiftplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by the engine, storage, and application layers.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{Display, EnumString};

use crate::error::ShiftplanError;

/// Stable identity of a worker. Never changes for the lifetime of the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerId(pub String);

impl WorkerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unspecified,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Manager,
    #[default]
    Worker,
}

/// A member of the workforce directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    pub id: WorkerId,
    pub name: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default)]
    pub role: Role,
}

impl Worker {
    /// Create a worker-role directory entry.
    pub fn new(id: impl Into<String>, name: impl Into<String>, gender: Gender) -> Self {
        Self {
            id: WorkerId::new(id),
            name: name.into(),
            gender,
            role: Role::Worker,
        }
    }

    /// Only worker-role entries take part in automatic assignment.
    pub fn is_schedulable(&self) -> bool {
        self.role == Role::Worker
    }
}

/// Gender eligibility rule attached to a position.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum GenderRequirement {
    #[default]
    Any,
    Male,
    Female,
}

impl GenderRequirement {
    /// Whether a worker of `gender` may staff a position with this requirement.
    ///
    /// A worker with an unspecified gender only qualifies for `Any`.
    pub fn admits(self, gender: Gender) -> bool {
        match self {
            GenderRequirement::Any => true,
            GenderRequirement::Male => gender == Gender::Male,
            GenderRequirement::Female => gender == Gender::Female,
        }
    }
}

/// A station that must be staffed in every slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub name: String,
    #[serde(default)]
    pub gender_requirement: GenderRequirement,
    /// `false` for reserve/standby posts that are only ever filled by hand.
    #[serde(default = "default_auto_assignable")]
    pub auto_assignable: bool,
}

fn default_auto_assignable() -> bool {
    true
}

impl Position {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            gender_requirement: GenderRequirement::Any,
            auto_assignable: true,
        }
    }

    pub fn with_gender(mut self, requirement: GenderRequirement) -> Self {
        self.gender_requirement = requirement;
        self
    }

    pub fn manual_only(mut self) -> Self {
        self.auto_assignable = false;
        self
    }
}

/// Labelled time window within a calendar date.
///
/// `first` and `second` are the canonical labels. Older records used
/// `evening` and `morning`; those are accepted on input only and always
/// written back in canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSlot {
    #[serde(alias = "evening")]
    First,
    #[serde(alias = "morning")]
    Second,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 2] = [TimeSlot::First, TimeSlot::Second];

    pub fn as_str(self) -> &'static str {
        match self {
            TimeSlot::First => "first",
            TimeSlot::Second => "second",
        }
    }

    /// Map a legacy `evening`/`morning` label onto the canonical vocabulary.
    pub fn from_legacy_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "evening" => Some(TimeSlot::First),
            "morning" => Some(TimeSlot::Second),
            _ => None,
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeSlot {
    type Err = ShiftplanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" => Ok(TimeSlot::First),
            "second" => Ok(TimeSlot::Second),
            other => TimeSlot::from_legacy_label(other)
                .ok_or_else(|| ShiftplanError::unrecognized("time slot", s)),
        }
    }
}

/// Wall-clock time with minute resolution, written as `HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime {
    minutes: u16,
}

impl ClockTime {
    /// Build a clock time. Panics on out-of-range components, so only use
    /// this with literal values.
    pub const fn hm(hour: u16, minute: u16) -> Self {
        assert!(hour < 24 && minute < 60, "clock time out of range");
        Self {
            minutes: hour * 60 + minute,
        }
    }

    pub fn hour(self) -> u16 {
        self.minutes / 60
    }

    pub fn minute(self) -> u16 {
        self.minutes % 60
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = ShiftplanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map_err(|_| ShiftplanError::unrecognized("clock time", s))?;
        // Both components are bounded by chrono, so the narrowing is lossless.
        Ok(ClockTime::hm(parsed.hour() as u16, parsed.minute() as u16))
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Start and end of one slot, e.g. `20:00-00:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShiftTime {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl ShiftTime {
    pub const fn new(start: ClockTime, end: ClockTime) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for ShiftTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for ShiftTime {
    type Err = ShiftplanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| ShiftplanError::unrecognized("shift time range", s))?;
        Ok(ShiftTime::new(start.parse()?, end.parse()?))
    }
}

/// Clock times for every slot label in a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftTimes {
    pub first: ShiftTime,
    pub second: ShiftTime,
}

impl ShiftTimes {
    pub fn for_slot(&self, slot: TimeSlot) -> ShiftTime {
        match slot {
            TimeSlot::First => self.first,
            TimeSlot::Second => self.second,
        }
    }
}

/// A worker's declared unavailability (or explicit availability) for one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    pub id: String,
    pub worker_id: WorkerId,
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
    pub is_blocked: bool,
    #[serde(default)]
    pub reason: String,
}

impl Constraint {
    /// Create a blocking constraint with a fresh identifier.
    pub fn blocking(
        worker_id: WorkerId,
        date: NaiveDate,
        time_slot: TimeSlot,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            worker_id,
            date,
            time_slot,
            is_blocked: true,
            reason: reason.into(),
        }
    }

    /// Whether this record excludes `worker_id` from `date`/`time_slot`.
    pub fn blocks(&self, worker_id: &WorkerId, date: NaiveDate, time_slot: TimeSlot) -> bool {
        self.is_blocked
            && &self.worker_id == worker_id
            && self.date == date
            && self.time_slot == time_slot
    }
}

/// Rank of a matched position within a worker's preference list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[strum(serialize_all = "lowercase")]
pub enum PreferenceRank {
    First,
    Second,
    Third,
}

/// A worker's ranked soft preference for up to three positions.
///
/// Empty strings are treated the same as an absent choice, since older
/// records stored unused slots that way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    pub worker_id: WorkerId,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub first_choice: Option<String>,
    #[serde(default)]
    pub second_choice: Option<String>,
    #[serde(default)]
    pub third_choice: Option<String>,
}

impl Preference {
    pub fn new(worker_id: WorkerId) -> Self {
        Self {
            worker_id,
            ..Self::default()
        }
    }

    /// Set the ranked choices, highest priority first. Extra entries past
    /// the third are ignored.
    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut iter = choices.into_iter().map(Into::into);
        self.first_choice = iter.next();
        self.second_choice = iter.next();
        self.third_choice = iter.next();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Rank of `position` in this preference, if it is listed.
    pub fn rank_of(&self, position: &str) -> Option<PreferenceRank> {
        let matches = |choice: &Option<String>| {
            choice
                .as_deref()
                .is_some_and(|c| !c.trim().is_empty() && c == position)
        };
        if matches(&self.first_choice) {
            Some(PreferenceRank::First)
        } else if matches(&self.second_choice) {
            Some(PreferenceRank::Second)
        } else if matches(&self.third_choice) {
            Some(PreferenceRank::Third)
        } else {
            None
        }
    }
}

/// Deterministic key of a shift: one per (date, position, slot).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShiftId(pub String);

impl ShiftId {
    pub fn for_key(date: NaiveDate, position: &str, slot: TimeSlot) -> Self {
        Self(format!("{}-{}-{}", date.format("%Y-%m-%d"), position, slot))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShiftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ShiftStatus {
    #[default]
    Assigned,
    Approved,
}

/// One filled (date, slot, position) in a roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub id: ShiftId,
    pub date: NaiveDate,
    pub time_slot: TimeSlot,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub station: String,
    pub worker_id: WorkerId,
    pub worker_name: String,
    pub status: ShiftStatus,
}

/// Health status reported by storage health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Degraded(String),
    Unhealthy(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_slot_labels_map_to_canonical() {
        assert_eq!("evening".parse::<TimeSlot>().unwrap(), TimeSlot::First);
        assert_eq!("Morning".parse::<TimeSlot>().unwrap(), TimeSlot::Second);
        assert_eq!("first".parse::<TimeSlot>().unwrap(), TimeSlot::First);
        assert!(matches!(
            "afternoon".parse::<TimeSlot>(),
            Err(ShiftplanError::UnrecognizedConfiguration { .. })
        ));
    }

    #[test]
    fn legacy_slot_labels_deserialize_but_serialize_canonical() {
        let slot: TimeSlot = serde_json::from_str("\"morning\"").unwrap();
        assert_eq!(slot, TimeSlot::Second);
        assert_eq!(serde_json::to_string(&slot).unwrap(), "\"second\"");
    }

    #[test]
    fn clock_time_parses_and_formats() {
        let t: ClockTime = "08:05".parse().unwrap();
        assert_eq!(t, ClockTime::hm(8, 5));
        assert_eq!(t.to_string(), "08:05");
        assert!("24:00".parse::<ClockTime>().is_err());
        assert!("8am".parse::<ClockTime>().is_err());
    }

    #[test]
    fn shift_time_range_parses() {
        let range: ShiftTime = "20:00-00:00".parse().unwrap();
        assert_eq!(range.start, ClockTime::hm(20, 0));
        assert_eq!(range.end, ClockTime::hm(0, 0));
        assert_eq!(range.to_string(), "20:00-00:00");
        assert!("20:00".parse::<ShiftTime>().is_err());
    }

    #[test]
    fn gender_requirement_admits() {
        assert!(GenderRequirement::Any.admits(Gender::Unspecified));
        assert!(GenderRequirement::Female.admits(Gender::Female));
        assert!(!GenderRequirement::Female.admits(Gender::Male));
        assert!(!GenderRequirement::Male.admits(Gender::Unspecified));
    }

    #[test]
    fn preference_rank_ignores_blank_choices() {
        let pref = Preference::new(WorkerId::new("w1")).with_choices(["", "Gate", "Tower"]);
        assert_eq!(pref.rank_of(""), None);
        assert_eq!(pref.rank_of("Gate"), Some(PreferenceRank::Second));
        assert_eq!(pref.rank_of("Tower"), Some(PreferenceRank::Third));
        assert_eq!(pref.rank_of("Patrol"), None);
    }

    #[test]
    fn shift_id_is_derived_from_key() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let id = ShiftId::for_key(date, "Gate", TimeSlot::Second);
        assert_eq!(id.as_str(), "2026-03-01-Gate-second");
        assert_eq!(id, ShiftId::for_key(date, "Gate", TimeSlot::Second));
    }

    #[test]
    fn constraint_blocks_only_its_own_slot() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let worker = WorkerId::new("w1");
        let c = Constraint::blocking(worker.clone(), date, TimeSlot::First, "exam");
        assert!(c.blocks(&worker, date, TimeSlot::First));
        assert!(!c.blocks(&worker, date, TimeSlot::Second));
        assert!(!c.blocks(&WorkerId::new("w2"), date, TimeSlot::First));

        let allowed = Constraint {
            is_blocked: false,
            ..c
        };
        assert!(!allowed.blocks(&worker, date, TimeSlot::First));
    }

    #[test]
    fn worker_roles_parse_case_insensitively() {
        assert_eq!("Manager".parse::<Role>().unwrap(), Role::Manager);
        assert_eq!("FEMALE".parse::<Gender>().unwrap(), Gender::Female);
        assert!(!Worker {
            role: Role::Manager,
            ..Worker::new("m", "Boss", Gender::Male)
        }
        .is_schedulable());
    }
}
