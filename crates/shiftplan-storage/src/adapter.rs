// SPDX-FileCopyrightText: 2026 Shiftplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the repository traits.

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::OnceCell;
use tracing::debug;

use shiftplan_config::model::StorageConfig;
use shiftplan_core::{
    Constraint, ConstraintRepository, HealthStatus, Preference, PreferenceRepository, Shift,
    ShiftId, ShiftRepository, ShiftStatus, ShiftplanError, StorageAdapter, Worker, WorkerId,
    WorkerRepository,
};

use crate::database::{Database, map_tr_err};
use crate::queries;

/// SQLite-backed storage adapter.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily initialized on the first
/// call to [`StorageAdapter::initialize`].
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage with the given configuration.
    ///
    /// The database connection is not opened until [`StorageAdapter::initialize`] is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns a reference to the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, ShiftplanError> {
        self.db.get().ok_or_else(|| ShiftplanError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    async fn initialize(&self) -> Result<(), ShiftplanError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| ShiftplanError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), ShiftplanError> {
        self.db()?.checkpoint().await
    }

    async fn health_check(&self) -> Result<HealthStatus, ShiftplanError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl WorkerRepository for SqliteStorage {
    async fn list_workers(&self) -> Result<Vec<Worker>, ShiftplanError> {
        queries::workers::list_workers(self.db()?).await
    }

    async fn get_worker(&self, id: &WorkerId) -> Result<Option<Worker>, ShiftplanError> {
        queries::workers::get_worker(self.db()?, id).await
    }

    async fn upsert_worker(&self, worker: &Worker) -> Result<(), ShiftplanError> {
        queries::workers::upsert_worker(self.db()?, worker).await
    }

    async fn remove_worker(&self, id: &WorkerId) -> Result<bool, ShiftplanError> {
        queries::workers::remove_worker(self.db()?, id).await
    }
}

#[async_trait]
impl ConstraintRepository for SqliteStorage {
    async fn list_constraints(
        &self,
        worker: Option<&WorkerId>,
    ) -> Result<Vec<Constraint>, ShiftplanError> {
        queries::constraints::list_constraints(self.db()?, worker).await
    }

    async fn constraints_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Constraint>, ShiftplanError> {
        queries::constraints::constraints_between(self.db()?, from, to).await
    }

    async fn add_constraint(&self, constraint: &Constraint) -> Result<(), ShiftplanError> {
        queries::constraints::add_constraint(self.db()?, constraint).await
    }

    async fn update_constraint(
        &self,
        id: &str,
        is_blocked: bool,
        reason: &str,
    ) -> Result<(), ShiftplanError> {
        queries::constraints::update_constraint(self.db()?, id, is_blocked, reason).await
    }

    async fn remove_constraint(&self, id: &str) -> Result<bool, ShiftplanError> {
        queries::constraints::remove_constraint(self.db()?, id).await
    }
}

#[async_trait]
impl PreferenceRepository for SqliteStorage {
    async fn get_preference(
        &self,
        worker: &WorkerId,
    ) -> Result<Option<Preference>, ShiftplanError> {
        queries::preferences::get_preference(self.db()?, worker).await
    }

    async fn list_preferences(&self) -> Result<Vec<Preference>, ShiftplanError> {
        queries::preferences::list_preferences(self.db()?).await
    }

    async fn upsert_preference(&self, preference: &Preference) -> Result<(), ShiftplanError> {
        queries::preferences::upsert_preference(self.db()?, preference).await
    }
}

#[async_trait]
impl ShiftRepository for SqliteStorage {
    async fn shifts_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Shift>, ShiftplanError> {
        queries::shifts::shifts_between(self.db()?, from, to).await
    }

    async fn get_shift(&self, id: &ShiftId) -> Result<Option<Shift>, ShiftplanError> {
        queries::shifts::get_shift(self.db()?, id).await
    }

    async fn upsert_shifts(&self, shifts: &[Shift]) -> Result<(), ShiftplanError> {
        queries::shifts::upsert_shifts(self.db()?, shifts).await
    }

    async fn update_shift_worker(
        &self,
        id: &ShiftId,
        worker_id: &WorkerId,
        worker_name: &str,
    ) -> Result<(), ShiftplanError> {
        queries::shifts::update_shift_worker(self.db()?, id, worker_id, worker_name).await
    }

    async fn set_status_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        status: ShiftStatus,
    ) -> Result<usize, ShiftplanError> {
        queries::shifts::set_status_between(self.db()?, from, to, status).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn make_config(path: &str) -> StorageConfig {
        StorageConfig {
            database_path: path.to_string(),
            wal_mode: true,
        }
    }

    #[tokio::test]
    async fn initialize_opens_database_at_configured_path() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("init_test.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));

        assert_eq!(storage.name(), "sqlite");
        storage.initialize().await.unwrap();
        assert!(db_path.exists(), "database file should be created");
    }

    #[tokio::test]
    async fn initialize_twice_returns_error() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("double_init.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));

        storage.initialize().await.unwrap();
        let result = storage.initialize().await;
        assert!(result.is_err(), "second initialize should fail");
    }

    #[tokio::test]
    async fn health_check_returns_healthy_when_initialized() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("health.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));

        storage.initialize().await.unwrap();
        let status = storage.health_check().await.unwrap();
        assert_eq!(status, HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn queries_fail_when_not_initialized() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("no_init.db");
        let storage = SqliteStorage::new(make_config(db_path.to_str().unwrap()));

        assert!(storage.health_check().await.is_err());
        assert!(matches!(
            storage.list_workers().await,
            Err(ShiftplanError::Storage { .. })
        ));
    }
}
