// SPDX-FileCopyrightText: 2026 Shiftplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Shiftplan scheduler.
//!
//! This crate provides the domain types, the shared error type, and the
//! repository traits used throughout the Shiftplan workspace. Storage
//! backends implement the traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ShiftplanError;
pub use types::{
    ClockTime, Constraint, Gender, GenderRequirement, HealthStatus, Position, Preference,
    PreferenceRank, Role, Shift, ShiftId, ShiftStatus, ShiftTime, ShiftTimes, TimeSlot, Worker,
    WorkerId,
};

pub use traits::{
    ConstraintRepository, PreferenceRepository, ShiftRepository, StorageAdapter,
    WorkerRepository,
};
