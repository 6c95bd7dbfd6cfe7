// SPDX-FileCopyrightText: 2026 Shiftplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use chrono::Weekday;
use shiftplan_config::ShiftplanConfig;
use shiftplan_core::{Position, ShiftTimes, ShiftplanError};
use shiftplan_engine::ScoringWeights;
use shiftplan_engine::shift_times::default_times;

/// Resolved planning parameters.
#[derive(Debug, Clone)]
pub struct PlannerSettings {
    pub week_starts_on: Weekday,
    pub shift_times: ShiftTimes,
    pub weights: ScoringWeights,
    pub positions: Vec<Position>,
    /// Seed used when a run does not supply one.
    pub seed: Option<u64>,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            week_starts_on: Weekday::Sun,
            shift_times: default_times(),
            weights: ScoringWeights::default(),
            positions: Vec::new(),
            seed: None,
        }
    }
}

impl PlannerSettings {
    /// Resolve settings from a loaded configuration. Fails on values the
    /// config validator would also reject.
    pub fn from_config(config: &ShiftplanConfig) -> Result<Self, ShiftplanError> {
        let weights = config.scoring.weights();
        weights.validate()?;
        Ok(Self {
            week_starts_on: config.schedule.week_start_day()?,
            shift_times: config.schedule.shift_times()?,
            weights,
            positions: config.position_catalog(),
            seed: config.schedule.seed,
        })
    }

    pub fn with_positions(mut self, positions: Vec<Position>) -> Self {
        self.positions = positions;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
