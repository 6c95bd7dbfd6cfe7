// SPDX-FileCopyrightText: 2026 Shiftplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Worker directory operations.

use rusqlite::{Row, params};
use shiftplan_core::{ShiftplanError, Worker, WorkerId};

use crate::database::{Database, map_tr_err};
use crate::queries::{now_timestamp, parse_column};

fn worker_from_row(row: &Row<'_>) -> rusqlite::Result<Worker> {
    Ok(Worker {
        id: WorkerId(row.get(0)?),
        name: row.get(1)?,
        gender: parse_column(row, 2)?,
        role: parse_column(row, 3)?,
    })
}

/// List every worker, ordered by id.
pub async fn list_workers(db: &Database) -> Result<Vec<Worker>, ShiftplanError> {
    db.connection()
        .call(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, name, gender, role FROM workers ORDER BY id")?;
            let rows = stmt.query_map([], worker_from_row)?;
            let mut workers = Vec::new();
            for row in rows {
                workers.push(row?);
            }
            Ok(workers)
        })
        .await
        .map_err(map_tr_err)
}

/// Get a worker by id.
pub async fn get_worker(db: &Database, id: &WorkerId) -> Result<Option<Worker>, ShiftplanError> {
    let id = id.as_str().to_string();
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                "SELECT id, name, gender, role FROM workers WHERE id = ?1",
                params![id],
                worker_from_row,
            );
            match result {
                Ok(worker) => Ok(Some(worker)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Insert a worker or update the existing record with the same id.
pub async fn upsert_worker(db: &Database, worker: &Worker) -> Result<(), ShiftplanError> {
    let worker = worker.clone();
    let now = now_timestamp();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO workers (id, name, gender, role, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?5)
                 ON CONFLICT(id) DO UPDATE SET
                     name = excluded.name,
                     gender = excluded.gender,
                     role = excluded.role,
                     updated_at = excluded.updated_at",
                params![
                    worker.id.as_str(),
                    worker.name,
                    worker.gender.to_string(),
                    worker.role.to_string(),
                    now,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Delete a worker. Their constraints and preference go with them.
pub async fn remove_worker(db: &Database, id: &WorkerId) -> Result<bool, ShiftplanError> {
    let id = id.as_str().to_string();
    let removed = db
        .connection()
        .call(move |conn| conn.execute("DELETE FROM workers WHERE id = ?1", params![id]))
        .await
        .map_err(map_tr_err)?;
    Ok(removed > 0)
}
