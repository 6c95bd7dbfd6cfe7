// SPDX-FileCopyrightText: 2026 Shiftplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Shiftplan scheduler.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::collections::BTreeMap;

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use shiftplan_core::{ClockTime, GenderRequirement, Position, ShiftTime, ShiftTimes, ShiftplanError};
use shiftplan_engine::ScoringWeights;
use shiftplan_engine::shift_times;

/// Top-level Shiftplan configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ShiftplanConfig {
    /// Process-wide settings.
    #[serde(default)]
    pub app: AppConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Week layout and slot timing.
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Candidate scoring weights.
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Position catalog, filled in the order listed.
    #[serde(default)]
    pub positions: Vec<PositionConfig>,
}

impl ShiftplanConfig {
    /// The position catalog as domain values.
    pub fn position_catalog(&self) -> Vec<Position> {
        self.positions.iter().map(PositionConfig::to_position).collect()
    }
}

/// Process-wide configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("shiftplan").join("shiftplan.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("shiftplan.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// Week layout and slot timing.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleConfig {
    /// Weekday a scheduling window starts on (`sunday`, `mon`, ...).
    #[serde(default = "default_week_starts_on")]
    pub week_starts_on: String,

    /// Start of the first slot, `HH:MM`.
    #[serde(default = "default_first_slot_start")]
    pub first_slot_start: String,

    /// End of the first slot, `HH:MM`. The second slot is derived from the pair.
    #[serde(default = "default_first_slot_end")]
    pub first_slot_end: String,

    /// Fixed tie-breaker seed. Unset means a fresh seed per run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Explicit slot ranges keyed by label, e.g. `first = "04:00-08:00"`.
    /// When present they replace `first_slot_start`/`first_slot_end`; a
    /// missing `second` entry is still derived from the first slot.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub slot_times: BTreeMap<String, String>,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            week_starts_on: default_week_starts_on(),
            first_slot_start: default_first_slot_start(),
            first_slot_end: default_first_slot_end(),
            seed: None,
            slot_times: BTreeMap::new(),
        }
    }
}

impl ScheduleConfig {
    pub fn week_start_day(&self) -> Result<Weekday, ShiftplanError> {
        self.week_starts_on
            .trim()
            .parse::<Weekday>()
            .map_err(|_| ShiftplanError::unrecognized("weekday", &self.week_starts_on))
    }

    /// Slot timing: the configured first slot and its rotated partner, or
    /// the `slot_times` table when one is given.
    pub fn shift_times(&self) -> Result<ShiftTimes, ShiftplanError> {
        if !self.slot_times.is_empty() {
            let ranges = self
                .slot_times
                .iter()
                .map(|(label, range)| Ok((label.as_str(), range.trim().parse::<ShiftTime>()?)))
                .collect::<Result<Vec<_>, ShiftplanError>>()?;
            return shift_times::from_labels(ranges);
        }

        let first = ShiftTime::new(
            self.first_slot_start.trim().parse::<ClockTime>()?,
            self.first_slot_end.trim().parse::<ClockTime>()?,
        );
        Ok(shift_times::from_first(first))
    }
}

fn default_week_starts_on() -> String {
    "sunday".to_string()
}

fn default_first_slot_start() -> String {
    "20:00".to_string()
}

fn default_first_slot_end() -> String {
    "00:00".to_string()
}

/// Candidate scoring weights.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    #[serde(default = "default_first_choice_bonus")]
    pub first_choice_bonus: f64,

    #[serde(default = "default_second_choice_bonus")]
    pub second_choice_bonus: f64,

    #[serde(default = "default_third_choice_bonus")]
    pub third_choice_bonus: f64,

    /// Scale of the `weight / (1 + prior assignments)` fairness term.
    #[serde(default = "default_fairness_weight")]
    pub fairness_weight: f64,

    /// Upper bound of the random tie-breaker added to each score.
    #[serde(default = "default_jitter")]
    pub jitter: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringWeights::default().into()
    }
}

impl From<ScoringWeights> for ScoringConfig {
    fn from(w: ScoringWeights) -> Self {
        Self {
            first_choice_bonus: w.first_choice,
            second_choice_bonus: w.second_choice,
            third_choice_bonus: w.third_choice,
            fairness_weight: w.fairness,
            jitter: w.jitter,
        }
    }
}

impl ScoringConfig {
    pub fn weights(&self) -> ScoringWeights {
        ScoringWeights {
            first_choice: self.first_choice_bonus,
            second_choice: self.second_choice_bonus,
            third_choice: self.third_choice_bonus,
            fairness: self.fairness_weight,
            jitter: self.jitter,
        }
    }
}

fn default_first_choice_bonus() -> f64 {
    ScoringWeights::default().first_choice
}

fn default_second_choice_bonus() -> f64 {
    ScoringWeights::default().second_choice
}

fn default_third_choice_bonus() -> f64 {
    ScoringWeights::default().third_choice
}

fn default_fairness_weight() -> f64 {
    ScoringWeights::default().fairness
}

fn default_jitter() -> f64 {
    ScoringWeights::default().jitter
}

/// One `[[positions]]` entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PositionConfig {
    pub name: String,

    /// `any`, `male` or `female`.
    #[serde(default)]
    pub gender: GenderRequirement,

    /// `false` for reserve posts that are only staffed by hand.
    #[serde(default = "default_auto_assign")]
    pub auto_assign: bool,
}

fn default_auto_assign() -> bool {
    true
}

impl PositionConfig {
    pub fn to_position(&self) -> Position {
        Position {
            name: self.name.trim().to_string(),
            gender_requirement: self.gender,
            auto_assignable: self.auto_assign,
        }
    }
}
