// SPDX-FileCopyrightText: 2026 Shiftplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence seams for the application layer.
//!
//! The assignment engine never sees these traits; it takes plain data. The
//! planner loads that data through the repositories and writes results back.
//! All traits use `#[async_trait]` for dynamic dispatch compatibility.

pub mod repository;
pub mod storage;

pub use repository::{
    ConstraintRepository, PreferenceRepository, ShiftRepository, WorkerRepository,
};
pub use storage::StorageAdapter;
