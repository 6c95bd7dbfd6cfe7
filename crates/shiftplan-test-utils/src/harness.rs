// SPDX-FileCopyrightText: 2026 Shiftplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness backed by a real SQLite file.
//!
//! `TestHarness` opens a [`SqliteStorage`] in a temporary directory and seeds
//! it from a [`Fixture`]. The directory lives as long as the harness.

use std::sync::Arc;

use shiftplan_config::model::StorageConfig;
use shiftplan_core::{ShiftplanError, StorageAdapter};
use shiftplan_storage::SqliteStorage;
use tempfile::TempDir;

use crate::fixtures::Fixture;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    fixture: Fixture,
    wal_mode: bool,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            fixture: Fixture::default(),
            wal_mode: true,
        }
    }

    pub fn with_fixture(mut self, fixture: Fixture) -> Self {
        self.fixture = fixture;
        self
    }

    pub fn with_wal_mode(mut self, wal_mode: bool) -> Self {
        self.wal_mode = wal_mode;
        self
    }

    /// Open the database, run migrations, and seed the fixture.
    pub async fn build(self) -> Result<TestHarness, ShiftplanError> {
        let temp_dir =
            TempDir::new().map_err(|e| ShiftplanError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("test.db");

        let storage = SqliteStorage::new(StorageConfig {
            database_path: db_path.to_string_lossy().into_owned(),
            wal_mode: self.wal_mode,
        });
        storage.initialize().await?;
        self.fixture.seed(&storage).await?;

        Ok(TestHarness {
            storage: Arc::new(storage),
            _temp_dir: temp_dir,
        })
    }
}

/// A seeded SQLite store in a temporary directory.
pub struct TestHarness {
    pub storage: Arc<SqliteStorage>,
    _temp_dir: TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiftplan_core::{ConstraintRepository, Gender, TimeSlot, WorkerRepository};

    #[tokio::test]
    async fn harness_seeds_fixture() {
        let harness = TestHarness::builder()
            .with_fixture(
                Fixture::new()
                    .with_worker("w1", "Dana", Gender::Female)
                    .with_manager("m1", "Mira")
                    .with_block("w1", 2, TimeSlot::First),
            )
            .build()
            .await
            .unwrap();

        assert_eq!(harness.storage.list_workers().await.unwrap().len(), 2);
        assert_eq!(harness.storage.list_constraints(None).await.unwrap().len(), 1);
    }
}
