// SPDX-FileCopyrightText: 2026 Shiftplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Repository behaviour of the SQLite adapter against a real database file.

use chrono::NaiveDate;
use shiftplan_config::model::StorageConfig;
use shiftplan_core::{
    ClockTime, Constraint, ConstraintRepository, Gender, Preference, PreferenceRepository, Role,
    Shift, ShiftId, ShiftRepository, ShiftStatus, ShiftplanError, StorageAdapter, TimeSlot,
    Worker, WorkerId, WorkerRepository,
};
use shiftplan_storage::SqliteStorage;
use tempfile::TempDir;

async fn open() -> (TempDir, SqliteStorage) {
    let dir = tempfile::tempdir().unwrap();
    let storage = SqliteStorage::new(StorageConfig {
        database_path: dir.path().join("plan.db").to_string_lossy().into_owned(),
        wal_mode: true,
    });
    storage.initialize().await.unwrap();
    (dir, storage)
}

fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
}

fn shift(day: u32, slot: TimeSlot, station: &str, worker: &str) -> Shift {
    Shift {
        id: ShiftId::for_key(d(day), station, slot),
        date: d(day),
        time_slot: slot,
        start_time: ClockTime::hm(20, 0),
        end_time: ClockTime::hm(0, 0),
        station: station.to_string(),
        worker_id: WorkerId::new(worker),
        worker_name: worker.to_uppercase(),
        status: ShiftStatus::Assigned,
    }
}

#[tokio::test]
async fn worker_upsert_and_removal() {
    let (_dir, storage) = open().await;

    let mut dana = Worker::new("w1", "Dana", Gender::Female);
    storage.upsert_worker(&dana).await.unwrap();
    storage
        .upsert_worker(&Worker::new("w0", "Avi", Gender::Male))
        .await
        .unwrap();

    dana.role = Role::Manager;
    dana.name = "Dana L.".into();
    storage.upsert_worker(&dana).await.unwrap();

    let all = storage.list_workers().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id.as_str(), "w0");
    assert_eq!(all[1], dana);

    assert!(storage.remove_worker(&WorkerId::new("w1")).await.unwrap());
    assert!(!storage.remove_worker(&WorkerId::new("w1")).await.unwrap());
    assert!(storage.get_worker(&WorkerId::new("w1")).await.unwrap().is_none());
}

#[tokio::test]
async fn constraints_follow_their_worker() {
    let (_dir, storage) = open().await;
    let w = WorkerId::new("w1");
    storage
        .upsert_worker(&Worker::new("w1", "Dana", Gender::Female))
        .await
        .unwrap();

    let c = Constraint::blocking(w.clone(), d(3), TimeSlot::Second, "exam");
    storage.add_constraint(&c).await.unwrap();
    storage
        .add_constraint(&Constraint::blocking(w.clone(), d(20), TimeSlot::First, ""))
        .await
        .unwrap();

    let in_week = storage.constraints_between(d(1), d(8)).await.unwrap();
    assert_eq!(in_week, vec![c.clone()]);

    storage.update_constraint(&c.id, false, "moved").await.unwrap();
    let mine = storage.list_constraints(Some(&w)).await.unwrap();
    assert_eq!(mine.len(), 2);
    assert!(!mine[0].is_blocked);
    assert_eq!(mine[0].reason, "moved");

    // Removing the worker cascades.
    storage.remove_worker(&w).await.unwrap();
    assert!(storage.list_constraints(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn constraint_for_unknown_worker_is_not_found() {
    let (_dir, storage) = open().await;
    let c = Constraint::blocking(WorkerId::new("ghost"), d(1), TimeSlot::First, "");
    let err = storage.add_constraint(&c).await.unwrap_err();
    assert!(matches!(err, ShiftplanError::NotFound { entity: "worker", .. }));

    let err = storage.update_constraint("nope", true, "").await.unwrap_err();
    assert!(matches!(err, ShiftplanError::NotFound { entity: "constraint", .. }));
    assert!(!storage.remove_constraint("nope").await.unwrap());
}

#[tokio::test]
async fn preference_is_one_record_per_worker() {
    let (_dir, storage) = open().await;
    let w = WorkerId::new("w1");
    storage
        .upsert_worker(&Worker::new("w1", "Dana", Gender::Female))
        .await
        .unwrap();

    let first = Preference::new(w.clone()).with_choices(["Gate", "Lobby"]);
    storage.upsert_preference(&first).await.unwrap();
    let second = Preference::new(w.clone())
        .with_choices(["Lobby"])
        .with_notes("no nights");
    storage.upsert_preference(&second).await.unwrap();

    let all = storage.list_preferences().await.unwrap();
    assert_eq!(all, vec![second.clone()]);
    assert_eq!(storage.get_preference(&w).await.unwrap(), Some(second));

    let err = storage
        .upsert_preference(&Preference::new(WorkerId::new("ghost")))
        .await
        .unwrap_err();
    assert!(matches!(err, ShiftplanError::NotFound { .. }));
}

#[tokio::test]
async fn shift_upsert_overwrites_by_id() {
    let (_dir, storage) = open().await;
    storage
        .upsert_shifts(&[
            shift(2, TimeSlot::Second, "Lobby", "a"),
            shift(2, TimeSlot::First, "Gate", "a"),
            shift(1, TimeSlot::First, "Gate", "b"),
        ])
        .await
        .unwrap();
    storage
        .upsert_shifts(&[shift(2, TimeSlot::First, "Gate", "c")])
        .await
        .unwrap();

    let week = storage.shifts_between(d(1), d(8)).await.unwrap();
    let keys: Vec<(NaiveDate, TimeSlot, &str, &str)> = week
        .iter()
        .map(|s| (s.date, s.time_slot, s.station.as_str(), s.worker_id.as_str()))
        .collect();
    assert_eq!(
        keys,
        vec![
            (d(1), TimeSlot::First, "Gate", "b"),
            (d(2), TimeSlot::First, "Gate", "c"),
            (d(2), TimeSlot::Second, "Lobby", "a"),
        ]
    );
    assert_eq!(week[0].start_time, ClockTime::hm(20, 0));
}

#[tokio::test]
async fn manual_override_and_bulk_approval() {
    let (_dir, storage) = open().await;
    let s = shift(2, TimeSlot::First, "Gate", "a");
    storage
        .upsert_shifts(&[s.clone(), shift(9, TimeSlot::First, "Gate", "a")])
        .await
        .unwrap();

    storage
        .update_shift_worker(&s.id, &WorkerId::new("z"), "Zohar")
        .await
        .unwrap();
    let edited = storage.get_shift(&s.id).await.unwrap().unwrap();
    assert_eq!(edited.worker_name, "Zohar");

    let err = storage
        .update_shift_worker(&ShiftId("nope".into()), &WorkerId::new("z"), "Z")
        .await
        .unwrap_err();
    assert!(matches!(err, ShiftplanError::NotFound { entity: "shift", .. }));

    assert_eq!(
        storage
            .set_status_between(d(1), d(8), ShiftStatus::Approved)
            .await
            .unwrap(),
        1
    );
    // Idempotent, and shifts outside the range are untouched.
    assert_eq!(
        storage
            .set_status_between(d(1), d(8), ShiftStatus::Approved)
            .await
            .unwrap(),
        0
    );
    let later = storage.shifts_between(d(9), d(9)).await.unwrap();
    assert_eq!(later[0].status, ShiftStatus::Assigned);
}

#[tokio::test]
async fn data_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig {
        database_path: dir.path().join("plan.db").to_string_lossy().into_owned(),
        wal_mode: true,
    };
    let storage = SqliteStorage::new(config.clone());
    storage.initialize().await.unwrap();
    storage
        .upsert_worker(&Worker::new("w1", "Dana", Gender::Female))
        .await
        .unwrap();
    storage.close().await.unwrap();
    drop(storage);

    let reopened = SqliteStorage::new(config);
    reopened.initialize().await.unwrap();
    assert_eq!(reopened.list_workers().await.unwrap().len(), 1);
}
