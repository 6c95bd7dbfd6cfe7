// SPDX-FileCopyrightText: 2026 Shiftplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Availability constraint operations.

use chrono::NaiveDate;
use rusqlite::{Row, params};
use shiftplan_core::{Constraint, ShiftplanError, WorkerId};

use crate::database::{Database, map_tr_err};
use crate::queries::parse_column;

const COLUMNS: &str = "id, worker_id, date, time_slot, is_blocked, reason";

fn constraint_from_row(row: &Row<'_>) -> rusqlite::Result<Constraint> {
    Ok(Constraint {
        id: row.get(0)?,
        worker_id: WorkerId(row.get(1)?),
        date: row.get(2)?,
        time_slot: parse_column(row, 3)?,
        is_blocked: row.get(4)?,
        reason: row.get(5)?,
    })
}

/// List constraints, optionally for one worker, ordered by date then slot.
pub async fn list_constraints(
    db: &Database,
    worker: Option<&WorkerId>,
) -> Result<Vec<Constraint>, ShiftplanError> {
    let worker = worker.map(|w| w.as_str().to_string());
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM constraints
                 WHERE ?1 IS NULL OR worker_id = ?1
                 ORDER BY date, time_slot, worker_id"
            ))?;
            let rows = stmt.query_map(params![worker], constraint_from_row)?;
            let mut constraints = Vec::new();
            for row in rows {
                constraints.push(row?);
            }
            Ok(constraints)
        })
        .await
        .map_err(map_tr_err)
}

/// Constraints dated within `from..=to`.
pub async fn constraints_between(
    db: &Database,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<Constraint>, ShiftplanError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM constraints
                 WHERE date BETWEEN ?1 AND ?2
                 ORDER BY date, time_slot, worker_id"
            ))?;
            let rows = stmt.query_map(params![from, to], constraint_from_row)?;
            let mut constraints = Vec::new();
            for row in rows {
                constraints.push(row?);
            }
            Ok(constraints)
        })
        .await
        .map_err(map_tr_err)
}

/// Record a constraint for an existing worker.
pub async fn add_constraint(db: &Database, constraint: &Constraint) -> Result<(), ShiftplanError> {
    let c = constraint.clone();
    let worker = c.worker_id.clone();
    let inserted = db
        .connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO constraints (id, worker_id, date, time_slot, is_blocked, reason)
                 SELECT ?1, ?2, ?3, ?4, ?5, ?6
                 WHERE EXISTS (SELECT 1 FROM workers WHERE id = ?2)",
                params![
                    c.id,
                    c.worker_id.as_str(),
                    c.date,
                    c.time_slot.as_str(),
                    c.is_blocked,
                    c.reason,
                ],
            )
        })
        .await
        .map_err(map_tr_err)?;
    if inserted == 0 {
        return Err(ShiftplanError::not_found("worker", worker.as_str()));
    }
    Ok(())
}

/// Edit the flag and reason of an existing constraint.
pub async fn update_constraint(
    db: &Database,
    id: &str,
    is_blocked: bool,
    reason: &str,
) -> Result<(), ShiftplanError> {
    let (key, reason) = (id.to_string(), reason.to_string());
    let updated = db
        .connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE constraints SET is_blocked = ?2, reason = ?3 WHERE id = ?1",
                params![key, is_blocked, reason],
            )
        })
        .await
        .map_err(map_tr_err)?;
    if updated == 0 {
        return Err(ShiftplanError::not_found("constraint", id));
    }
    Ok(())
}

/// Delete a constraint. Returns `false` if the id was unknown.
pub async fn remove_constraint(db: &Database, id: &str) -> Result<bool, ShiftplanError> {
    let id = id.to_string();
    let removed = db
        .connection()
        .call(move |conn| conn.execute("DELETE FROM constraints WHERE id = ?1", params![id]))
        .await
        .map_err(map_tr_err)?;
    Ok(removed > 0)
}
