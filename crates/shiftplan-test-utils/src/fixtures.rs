// SPDX-FileCopyrightText: 2026 Shiftplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixture builders for directories, constraints, and preferences.

use chrono::{Days, NaiveDate};
use shiftplan_core::{
    Constraint, Gender, Preference, Role, ShiftplanError, StorageAdapter, TimeSlot, Worker,
    WorkerId,
};

use crate::memory_store::MemoryStore;

/// A Sunday, so the default configuration starts its window here.
pub fn week_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 1).unwrap_or_default()
}

/// `offset` days after [`week_start`].
pub fn day(offset: u64) -> NaiveDate {
    week_start() + Days::new(offset)
}

/// Directory contents to seed a store with.
#[derive(Debug, Clone, Default)]
pub struct Fixture {
    pub workers: Vec<Worker>,
    pub constraints: Vec<Constraint>,
    pub preferences: Vec<Preference>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_worker(mut self, id: &str, name: &str, gender: Gender) -> Self {
        self.workers.push(Worker::new(id, name, gender));
        self
    }

    pub fn with_manager(mut self, id: &str, name: &str) -> Self {
        let mut manager = Worker::new(id, name, Gender::Unspecified);
        manager.role = Role::Manager;
        self.workers.push(manager);
        self
    }

    /// Block `worker` from `slot` on the day `offset` days into the week.
    pub fn with_block(mut self, worker: &str, offset: u64, slot: TimeSlot) -> Self {
        self.constraints.push(Constraint::blocking(
            WorkerId::new(worker),
            day(offset),
            slot,
            "fixture",
        ));
        self
    }

    pub fn with_preference(mut self, worker: &str, choices: &[&str]) -> Self {
        self.preferences.push(
            Preference::new(WorkerId::new(worker)).with_choices(choices.iter().copied()),
        );
        self
    }

    /// Write every record into `store`.
    pub async fn seed<S: StorageAdapter>(&self, store: &S) -> Result<(), ShiftplanError> {
        for worker in &self.workers {
            store.upsert_worker(worker).await?;
        }
        for constraint in &self.constraints {
            store.add_constraint(constraint).await?;
        }
        for preference in &self.preferences {
            store.upsert_preference(preference).await?;
        }
        Ok(())
    }

    /// A fresh [`MemoryStore`] holding this fixture.
    pub async fn memory(&self) -> Result<MemoryStore, ShiftplanError> {
        let store = MemoryStore::new();
        self.seed(&store).await?;
        Ok(store)
    }
}
