// SPDX-FileCopyrightText: 2026 Shiftplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Repository traits, one per stored entity.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::ShiftplanError;
use crate::types::{Constraint, Preference, Shift, ShiftId, ShiftStatus, Worker, WorkerId};

/// Worker directory.
#[async_trait]
pub trait WorkerRepository: Send + Sync {
    /// All directory entries, managers included, ordered by id.
    async fn list_workers(&self) -> Result<Vec<Worker>, ShiftplanError>;

    async fn get_worker(&self, id: &WorkerId) -> Result<Option<Worker>, ShiftplanError>;

    /// Insert a worker, or update name/gender/role if the id already exists.
    async fn upsert_worker(&self, worker: &Worker) -> Result<(), ShiftplanError>;

    /// Returns `false` if no such worker existed.
    async fn remove_worker(&self, id: &WorkerId) -> Result<bool, ShiftplanError>;
}

/// Per-slot availability constraints.
#[async_trait]
pub trait ConstraintRepository: Send + Sync {
    async fn list_constraints(
        &self,
        worker: Option<&WorkerId>,
    ) -> Result<Vec<Constraint>, ShiftplanError>;

    /// Constraints dated within `from..=to`.
    async fn constraints_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Constraint>, ShiftplanError>;

    async fn add_constraint(&self, constraint: &Constraint) -> Result<(), ShiftplanError>;

    /// Edit the flag and reason of an existing constraint. Errors with
    /// `NotFound` if the id is unknown.
    async fn update_constraint(
        &self,
        id: &str,
        is_blocked: bool,
        reason: &str,
    ) -> Result<(), ShiftplanError>;

    async fn remove_constraint(&self, id: &str) -> Result<bool, ShiftplanError>;
}

/// Ranked position preferences, at most one record per worker.
#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    async fn get_preference(
        &self,
        worker: &WorkerId,
    ) -> Result<Option<Preference>, ShiftplanError>;

    async fn list_preferences(&self) -> Result<Vec<Preference>, ShiftplanError>;

    /// Create the worker's preference if absent, otherwise replace it.
    async fn upsert_preference(&self, preference: &Preference) -> Result<(), ShiftplanError>;
}

/// Generated and manually edited shifts.
#[async_trait]
pub trait ShiftRepository: Send + Sync {
    /// Shifts dated within `from..=to`, ordered by date, slot, then station.
    async fn shifts_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Shift>, ShiftplanError>;

    async fn get_shift(&self, id: &ShiftId) -> Result<Option<Shift>, ShiftplanError>;

    /// Insert or overwrite by shift id.
    async fn upsert_shifts(&self, shifts: &[Shift]) -> Result<(), ShiftplanError>;

    /// Manual override: point an existing shift at a different worker.
    async fn update_shift_worker(
        &self,
        id: &ShiftId,
        worker_id: &WorkerId,
        worker_name: &str,
    ) -> Result<(), ShiftplanError>;

    /// Set the status of every shift within `from..=to`. Returns the number
    /// of rows whose status actually changed.
    async fn set_status_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        status: ShiftStatus,
    ) -> Result<usize, ShiftplanError>;
}
