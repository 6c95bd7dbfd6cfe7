// SPDX-FileCopyrightText: 2026 Shiftplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Roster (shift) operations.

use chrono::NaiveDate;
use rusqlite::{Row, params};
use shiftplan_core::{Shift, ShiftId, ShiftStatus, ShiftplanError, WorkerId};

use crate::database::{Database, map_tr_err};
use crate::queries::{now_timestamp, parse_column};

const COLUMNS: &str =
    "id, date, time_slot, start_time, end_time, station, worker_id, worker_name, status";

fn shift_from_row(row: &Row<'_>) -> rusqlite::Result<Shift> {
    Ok(Shift {
        id: ShiftId(row.get(0)?),
        date: row.get(1)?,
        time_slot: parse_column(row, 2)?,
        start_time: parse_column(row, 3)?,
        end_time: parse_column(row, 4)?,
        station: row.get(5)?,
        worker_id: WorkerId(row.get(6)?),
        worker_name: row.get(7)?,
        status: parse_column(row, 8)?,
    })
}

/// Shifts dated within `from..=to`, ordered by date, slot, then station.
pub async fn shifts_between(
    db: &Database,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<Shift>, ShiftplanError> {
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COLUMNS} FROM shifts
                 WHERE date BETWEEN ?1 AND ?2
                 ORDER BY date, time_slot, station"
            ))?;
            let rows = stmt.query_map(params![from, to], shift_from_row)?;
            let mut shifts = Vec::new();
            for row in rows {
                shifts.push(row?);
            }
            Ok(shifts)
        })
        .await
        .map_err(map_tr_err)
}

pub async fn get_shift(db: &Database, id: &ShiftId) -> Result<Option<Shift>, ShiftplanError> {
    let id = id.as_str().to_string();
    db.connection()
        .call(move |conn| {
            let result = conn.query_row(
                &format!("SELECT {COLUMNS} FROM shifts WHERE id = ?1"),
                params![id],
                shift_from_row,
            );
            match result {
                Ok(shift) => Ok(Some(shift)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await
        .map_err(map_tr_err)
}

/// Insert or overwrite shifts by id, all in one transaction.
pub async fn upsert_shifts(db: &Database, shifts: &[Shift]) -> Result<(), ShiftplanError> {
    let shifts = shifts.to_vec();
    let now = now_timestamp();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare(
                    "INSERT INTO shifts
                         (id, date, time_slot, start_time, end_time, station,
                          worker_id, worker_name, status, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)
                     ON CONFLICT(id) DO UPDATE SET
                         start_time = excluded.start_time,
                         end_time = excluded.end_time,
                         worker_id = excluded.worker_id,
                         worker_name = excluded.worker_name,
                         status = excluded.status,
                         updated_at = excluded.updated_at",
                )?;
                for s in &shifts {
                    stmt.execute(params![
                        s.id.as_str(),
                        s.date,
                        s.time_slot.as_str(),
                        s.start_time.to_string(),
                        s.end_time.to_string(),
                        s.station,
                        s.worker_id.as_str(),
                        s.worker_name,
                        s.status.to_string(),
                        now,
                    ])?;
                }
            }
            tx.commit()
        })
        .await
        .map_err(map_tr_err)
}

/// Point an existing shift at another worker.
pub async fn update_shift_worker(
    db: &Database,
    id: &ShiftId,
    worker_id: &WorkerId,
    worker_name: &str,
) -> Result<(), ShiftplanError> {
    let key = id.as_str().to_string();
    let worker_id = worker_id.as_str().to_string();
    let worker_name = worker_name.to_string();
    let now = now_timestamp();
    let updated = db
        .connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE shifts SET worker_id = ?2, worker_name = ?3, updated_at = ?4
                 WHERE id = ?1",
                params![key, worker_id, worker_name, now],
            )
        })
        .await
        .map_err(map_tr_err)?;
    if updated == 0 {
        return Err(ShiftplanError::not_found("shift", id.as_str()));
    }
    Ok(())
}

/// Set `status` on every shift in `from..=to`, returning how many changed.
pub async fn set_status_between(
    db: &Database,
    from: NaiveDate,
    to: NaiveDate,
    status: ShiftStatus,
) -> Result<usize, ShiftplanError> {
    let status = status.to_string();
    let now = now_timestamp();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "UPDATE shifts SET status = ?3, updated_at = ?4
                 WHERE date BETWEEN ?1 AND ?2 AND status <> ?3",
                params![from, to, status, now],
            )
        })
        .await
        .map_err(map_tr_err)
}
