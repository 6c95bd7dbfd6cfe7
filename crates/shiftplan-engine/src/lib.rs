// SPDX-FileCopyrightText: 2026 Shiftplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Weekly shift assignment for the Shiftplan scheduler.
//!
//! This crate provides:
//! - [`generate_assignments`]: the single-pass heuristic that fills every
//!   (date, slot, position) it can and omits the rest
//! - [`scoring`]: the pure preference + fairness scoring unit
//! - [`shift_times`]: the first-slot to second-slot rotation table
//! - [`window`]: boundary-inclusive scheduling windows and per-day slots
//! - [`roster`]: post-generation operations (manual override, approval,
//!   merging re-runs, grid view, unfilled report)
//!
//! Nothing here performs I/O. Callers load inputs, call in, and persist
//! the returned shifts themselves.

pub mod engine;
pub mod fairness;
pub mod roster;
pub mod scoring;
pub mod shift_times;
pub mod window;

pub use engine::{AssignmentInput, AssignmentOutcome, generate_assignments};
pub use fairness::FairnessLedger;
pub use roster::{RosterGrid, SlotKey};
pub use scoring::{ScoreBreakdown, ScoringWeights, score};
