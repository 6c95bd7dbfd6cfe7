// SPDX-FileCopyrightText: 2026 Shiftplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory storage adapter for deterministic testing.
//!
//! `MemoryStore` implements every repository trait with the same observable
//! semantics as the SQLite adapter (ordering, upsert keys, cascade on worker
//! removal, `NotFound` errors) and counts shift writes so tests can assert
//! that a dry run persisted nothing.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Mutex;

use shiftplan_core::{
    Constraint, ConstraintRepository, HealthStatus, Preference, PreferenceRepository, Shift,
    ShiftId, ShiftRepository, ShiftStatus, ShiftplanError, StorageAdapter, Worker, WorkerId,
    WorkerRepository,
};

#[derive(Default)]
struct State {
    workers: BTreeMap<WorkerId, Worker>,
    constraints: Vec<Constraint>,
    preferences: BTreeMap<WorkerId, Preference>,
    shifts: BTreeMap<ShiftId, Shift>,
}

/// A storage adapter that keeps everything in process memory.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
    shift_writes: AtomicUsize,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of shift write calls (upserts and overrides) made so far.
    pub fn shift_writes(&self) -> usize {
        self.shift_writes.load(Ordering::SeqCst)
    }

    /// Every stored shift regardless of date.
    pub async fn all_shifts(&self) -> Vec<Shift> {
        let mut shifts: Vec<Shift> = self.state.lock().await.shifts.values().cloned().collect();
        shifts.sort_by(|a, b| {
            (a.date, a.time_slot, &a.station).cmp(&(b.date, b.time_slot, &b.station))
        });
        shifts
    }
}

#[async_trait]
impl StorageAdapter for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn initialize(&self) -> Result<(), ShiftplanError> {
        Ok(())
    }

    async fn close(&self) -> Result<(), ShiftplanError> {
        Ok(())
    }

    async fn health_check(&self) -> Result<HealthStatus, ShiftplanError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl WorkerRepository for MemoryStore {
    async fn list_workers(&self) -> Result<Vec<Worker>, ShiftplanError> {
        Ok(self.state.lock().await.workers.values().cloned().collect())
    }

    async fn get_worker(&self, id: &WorkerId) -> Result<Option<Worker>, ShiftplanError> {
        Ok(self.state.lock().await.workers.get(id).cloned())
    }

    async fn upsert_worker(&self, worker: &Worker) -> Result<(), ShiftplanError> {
        self.state
            .lock()
            .await
            .workers
            .insert(worker.id.clone(), worker.clone());
        Ok(())
    }

    async fn remove_worker(&self, id: &WorkerId) -> Result<bool, ShiftplanError> {
        let mut state = self.state.lock().await;
        if state.workers.remove(id).is_none() {
            return Ok(false);
        }
        state.constraints.retain(|c| &c.worker_id != id);
        state.preferences.remove(id);
        Ok(true)
    }
}

#[async_trait]
impl ConstraintRepository for MemoryStore {
    async fn list_constraints(
        &self,
        worker: Option<&WorkerId>,
    ) -> Result<Vec<Constraint>, ShiftplanError> {
        let state = self.state.lock().await;
        let mut out: Vec<Constraint> = state
            .constraints
            .iter()
            .filter(|c| worker.is_none_or(|w| &c.worker_id == w))
            .cloned()
            .collect();
        sort_constraints(&mut out);
        Ok(out)
    }

    async fn constraints_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Constraint>, ShiftplanError> {
        let state = self.state.lock().await;
        let mut out: Vec<Constraint> = state
            .constraints
            .iter()
            .filter(|c| (from..=to).contains(&c.date))
            .cloned()
            .collect();
        sort_constraints(&mut out);
        Ok(out)
    }

    async fn add_constraint(&self, constraint: &Constraint) -> Result<(), ShiftplanError> {
        let mut state = self.state.lock().await;
        if !state.workers.contains_key(&constraint.worker_id) {
            return Err(ShiftplanError::not_found(
                "worker",
                constraint.worker_id.as_str(),
            ));
        }
        if state.constraints.iter().any(|c| c.id == constraint.id) {
            return Err(ShiftplanError::InvalidInput(format!(
                "duplicate constraint id {}",
                constraint.id
            )));
        }
        state.constraints.push(constraint.clone());
        Ok(())
    }

    async fn update_constraint(
        &self,
        id: &str,
        is_blocked: bool,
        reason: &str,
    ) -> Result<(), ShiftplanError> {
        let mut state = self.state.lock().await;
        let c = state
            .constraints
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| ShiftplanError::not_found("constraint", id))?;
        c.is_blocked = is_blocked;
        c.reason = reason.to_string();
        Ok(())
    }

    async fn remove_constraint(&self, id: &str) -> Result<bool, ShiftplanError> {
        let mut state = self.state.lock().await;
        let before = state.constraints.len();
        state.constraints.retain(|c| c.id != id);
        Ok(state.constraints.len() < before)
    }
}

fn sort_constraints(constraints: &mut [Constraint]) {
    constraints.sort_by(|a, b| {
        (a.date, a.time_slot, &a.worker_id).cmp(&(b.date, b.time_slot, &b.worker_id))
    });
}

#[async_trait]
impl PreferenceRepository for MemoryStore {
    async fn get_preference(
        &self,
        worker: &WorkerId,
    ) -> Result<Option<Preference>, ShiftplanError> {
        Ok(self.state.lock().await.preferences.get(worker).cloned())
    }

    async fn list_preferences(&self) -> Result<Vec<Preference>, ShiftplanError> {
        Ok(self.state.lock().await.preferences.values().cloned().collect())
    }

    async fn upsert_preference(&self, preference: &Preference) -> Result<(), ShiftplanError> {
        let mut state = self.state.lock().await;
        if !state.workers.contains_key(&preference.worker_id) {
            return Err(ShiftplanError::not_found(
                "worker",
                preference.worker_id.as_str(),
            ));
        }
        state
            .preferences
            .insert(preference.worker_id.clone(), preference.clone());
        Ok(())
    }
}

#[async_trait]
impl ShiftRepository for MemoryStore {
    async fn shifts_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Shift>, ShiftplanError> {
        Ok(self
            .all_shifts()
            .await
            .into_iter()
            .filter(|s| (from..=to).contains(&s.date))
            .collect())
    }

    async fn get_shift(&self, id: &ShiftId) -> Result<Option<Shift>, ShiftplanError> {
        Ok(self.state.lock().await.shifts.get(id).cloned())
    }

    async fn upsert_shifts(&self, shifts: &[Shift]) -> Result<(), ShiftplanError> {
        self.shift_writes.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().await;
        for shift in shifts {
            state.shifts.insert(shift.id.clone(), shift.clone());
        }
        Ok(())
    }

    async fn update_shift_worker(
        &self,
        id: &ShiftId,
        worker_id: &WorkerId,
        worker_name: &str,
    ) -> Result<(), ShiftplanError> {
        self.shift_writes.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().await;
        let shift = state
            .shifts
            .get_mut(id)
            .ok_or_else(|| ShiftplanError::not_found("shift", id.as_str()))?;
        shift.worker_id = worker_id.clone();
        shift.worker_name = worker_name.to_string();
        Ok(())
    }

    async fn set_status_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        status: ShiftStatus,
    ) -> Result<usize, ShiftplanError> {
        let mut state = self.state.lock().await;
        let mut changed = 0;
        for shift in state
            .shifts
            .values_mut()
            .filter(|s| (from..=to).contains(&s.date) && s.status != status)
        {
            shift.status = status;
            changed += 1;
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiftplan_core::{Gender, TimeSlot};

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    #[tokio::test]
    async fn removing_a_worker_cascades() {
        let store = MemoryStore::new();
        let w = WorkerId::new("w1");
        store
            .upsert_worker(&Worker::new("w1", "Dana", Gender::Female))
            .await
            .unwrap();
        store
            .add_constraint(&Constraint::blocking(w.clone(), d(1), TimeSlot::First, ""))
            .await
            .unwrap();
        store
            .upsert_preference(&Preference::new(w.clone()).with_choices(["Gate"]))
            .await
            .unwrap();

        assert!(store.remove_worker(&w).await.unwrap());
        assert!(store.list_constraints(None).await.unwrap().is_empty());
        assert!(store.get_preference(&w).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unknown_worker_is_rejected() {
        let store = MemoryStore::new();
        let c = Constraint::blocking(WorkerId::new("ghost"), d(1), TimeSlot::First, "");
        assert!(matches!(
            store.add_constraint(&c).await,
            Err(ShiftplanError::NotFound { entity: "worker", .. })
        ));
    }

    #[tokio::test]
    async fn shift_writes_are_counted() {
        let store = MemoryStore::new();
        assert_eq!(store.shift_writes(), 0);
        store.upsert_shifts(&[]).await.unwrap();
        assert_eq!(store.shift_writes(), 1);
    }
}
