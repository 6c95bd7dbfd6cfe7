// SPDX-FileCopyrightText: 2026 Shiftplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for persistence backends (SQLite, in-memory, etc.).

use async_trait::async_trait;

use crate::error::ShiftplanError;
use crate::traits::repository::{
    ConstraintRepository, PreferenceRepository, ShiftRepository, WorkerRepository,
};
use crate::types::HealthStatus;

/// A complete persistence backend.
///
/// Storage adapters manage the lifecycle of their connections and expose
/// every repository the planner needs.
#[async_trait]
pub trait StorageAdapter:
    WorkerRepository + ConstraintRepository + PreferenceRepository + ShiftRepository + 'static
{
    /// Returns the human-readable name of this backend.
    fn name(&self) -> &str;

    /// Initializes the storage backend (migrations, connections, etc.).
    async fn initialize(&self) -> Result<(), ShiftplanError>;

    /// Closes the storage backend, flushing pending writes.
    async fn close(&self) -> Result<(), ShiftplanError>;

    /// Performs a cheap liveness check.
    async fn health_check(&self) -> Result<HealthStatus, ShiftplanError>;
}
