// SPDX-FileCopyrightText: 2026 Shiftplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Position preference operations. One record per worker.

use rusqlite::{Row, params};
use shiftplan_core::{Preference, ShiftplanError, WorkerId};

use crate::database::{Database, map_tr_err};
use crate::queries::now_timestamp;

fn preference_from_row(row: &Row<'_>) -> rusqlite::Result<Preference> {
    Ok(Preference {
        worker_id: WorkerId(row.get(0)?),
        notes: row.get(1)?,
        first_choice: row.get(2)?,
        second_choice: row.get(3)?,
        third_choice: row.get(4)?,
    })
}

pub async fn get_preference(
    db: &Database,
    worker: &WorkerId,
) -> Result<Option<Preference>, ShiftplanError> {
    let worker = worker.as_str().to_string();
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                "SELECT worker_id, notes, first_choice, second_choice, third_choice
                 FROM preferences WHERE worker_id = ?1",
                params![worker],
                preference_from_row,
            );
            match result {
                Ok(pref) => Ok(Some(pref)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}

pub async fn list_preferences(db: &Database) -> Result<Vec<Preference>, ShiftplanError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT worker_id, notes, first_choice, second_choice, third_choice
                 FROM preferences ORDER BY worker_id",
            )?;
            let rows = stmt.query_map([], preference_from_row)?;
            let mut prefs = Vec::new();
            for row in rows {
                prefs.push(row?);
            }
            Ok(prefs)
        })
        .await
        .map_err(map_tr_err)
}

/// Create the worker's preference, or replace it if one exists.
pub async fn upsert_preference(db: &Database, pref: &Preference) -> Result<(), ShiftplanError> {
    let pref = pref.clone();
    let worker = pref.worker_id.clone();
    let now = now_timestamp();
    let written = db
        .connection()
        .call(move |conn| {
            // The WHERE clause also keeps the upsert parseable after a SELECT.
            conn.execute(
                "INSERT INTO preferences
                     (worker_id, notes, first_choice, second_choice, third_choice, updated_at)
                 SELECT ?1, ?2, ?3, ?4, ?5, ?6
                 WHERE EXISTS (SELECT 1 FROM workers WHERE id = ?1)
                 ON CONFLICT(worker_id) DO UPDATE SET
                     notes = excluded.notes,
                     first_choice = excluded.first_choice,
                     second_choice = excluded.second_choice,
                     third_choice = excluded.third_choice,
                     updated_at = excluded.updated_at",
                params![
                    pref.worker_id.as_str(),
                    pref.notes,
                    pref.first_choice,
                    pref.second_choice,
                    pref.third_choice,
                    now,
                ],
            )
        })
        .await
        .map_err(map_tr_err)?;
    if written == 0 {
        return Err(ShiftplanError::not_found("worker", worker.as_str()));
    }
    Ok(())
}
