// SPDX-FileCopyrightText: 2026 Shiftplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Candidate scoring.
//!
//! A candidate's score is a preference bonus plus a fairness term. Both are
//! pure functions of the worker, the position, the run's ledger so far and
//! the worker's preference record. The random tie-breaker is added by the
//! engine on top of [`ScoreBreakdown::total`].

use rand::Rng;
use serde::{Deserialize, Serialize};
use shiftplan_core::{Position, Preference, PreferenceRank, ShiftplanError, Worker};

use crate::fairness::FairnessLedger;

/// Tunable weights for candidate scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Bonus when the position is the worker's first choice.
    pub first_choice: f64,
    /// Bonus when the position is the worker's second choice.
    pub second_choice: f64,
    /// Bonus when the position is the worker's third choice.
    pub third_choice: f64,
    /// Fairness term for a worker with no prior assignment to the position.
    /// Decays as `fairness / (1 + prior)`.
    pub fairness: f64,
    /// Upper bound (exclusive) of the uniform random tie-breaker.
    pub jitter: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            first_choice: 30.0,
            second_choice: 20.0,
            third_choice: 10.0,
            fairness: 10.0,
            jitter: 0.01,
        }
    }
}

impl ScoringWeights {
    /// Reject weights that break the ranking contract.
    ///
    /// Bonuses must strictly decrease by rank and stay positive. Fairness and
    /// jitter must be positive, and jitter must stay below the smallest
    /// bonus step so it only ever breaks ties.
    pub fn validate(&self) -> Result<(), ShiftplanError> {
        let all = [
            ("first_choice", self.first_choice),
            ("second_choice", self.second_choice),
            ("third_choice", self.third_choice),
            ("fairness", self.fairness),
            ("jitter", self.jitter),
        ];
        for (name, value) in all {
            if !value.is_finite() || value < 0.0 {
                return Err(ShiftplanError::InvalidInput(format!(
                    "scoring weight `{name}` must be a non-negative number, got {value}"
                )));
            }
        }
        if !(self.first_choice > self.second_choice
            && self.second_choice > self.third_choice
            && self.third_choice > 0.0)
        {
            return Err(ShiftplanError::InvalidInput(format!(
                "preference bonuses must strictly decrease by rank and stay positive, got {}/{}/{}",
                self.first_choice, self.second_choice, self.third_choice
            )));
        }
        if self.fairness <= 0.0 {
            return Err(ShiftplanError::InvalidInput(format!(
                "fairness weight must be positive, got {}",
                self.fairness
            )));
        }
        let min_step = (self.first_choice - self.second_choice)
            .min(self.second_choice - self.third_choice)
            .min(self.third_choice);
        if self.jitter <= 0.0 || self.jitter >= min_step {
            return Err(ShiftplanError::InvalidInput(format!(
                "jitter must be positive and below the smallest bonus step ({min_step}), got {}",
                self.jitter
            )));
        }
        Ok(())
    }

    pub fn preference_bonus(&self, rank: Option<PreferenceRank>) -> f64 {
        match rank {
            Some(PreferenceRank::First) => self.first_choice,
            Some(PreferenceRank::Second) => self.second_choice,
            Some(PreferenceRank::Third) => self.third_choice,
            None => 0.0,
        }
    }

    /// Strictly decreasing in `prior` whenever `fairness > 0`.
    pub fn fairness_term(&self, prior: u32) -> f64 {
        self.fairness / (1.0 + f64::from(prior))
    }

    /// Requires validated weights; an empty range panics.
    pub(crate) fn sample_jitter<R: Rng>(&self, rng: &mut R) -> f64 {
        rng.gen_range(0.0..self.jitter)
    }
}

/// The deterministic part of a candidate's score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub preference: f64,
    pub fairness: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.preference + self.fairness
    }
}

/// Score `worker` for `position` given assignments made so far this run.
pub fn score(
    worker: &Worker,
    position: &Position,
    ledger: &FairnessLedger,
    preference: Option<&Preference>,
    weights: &ScoringWeights,
) -> ScoreBreakdown {
    let rank = preference.and_then(|p| p.rank_of(&position.name));
    ScoreBreakdown {
        preference: weights.preference_bonus(rank),
        fairness: weights.fairness_term(ledger.count(&worker.id, &position.name)),
    }
}
