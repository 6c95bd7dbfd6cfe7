// SPDX-FileCopyrightText: 2026 Shiftplan Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `shiftplan worker|constraint|preference` command implementations.
//!
//! These edit the records the planner reads. Every id is checked against
//! the worker directory by the store itself.

use shiftplan_core::{
    Constraint, Preference, Role, ShiftplanError, StorageAdapter, Worker, WorkerId,
};

use crate::render;
use crate::{ConstraintCommand, OutputMode, PreferenceCommand, WorkerCommand};

pub async fn run_worker<S: StorageAdapter>(
    store: &S,
    command: WorkerCommand,
    output: OutputMode,
) -> Result<(), ShiftplanError> {
    match command {
        WorkerCommand::Add {
            id,
            name,
            gender,
            manager,
        } => {
            let mut worker = Worker::new(id.trim(), name.trim(), gender);
            if worker.id.as_str().is_empty() {
                return Err(ShiftplanError::InvalidInput("worker id is empty".into()));
            }
            if manager {
                worker.role = Role::Manager;
            }
            store.upsert_worker(&worker).await?;
            println!("saved worker {} ({})", worker.id, worker.name);
        }
        WorkerCommand::List => {
            let workers = store.list_workers().await?;
            if output.json {
                return render::print_json(&workers);
            }
            render::print_workers(&workers, output.color);
        }
        WorkerCommand::Remove { id } => {
            let id = WorkerId::new(id);
            if !store.remove_worker(&id).await? {
                return Err(ShiftplanError::not_found("worker", id.as_str()));
            }
            println!("removed worker {id}");
        }
    }
    Ok(())
}

pub async fn run_constraint<S: StorageAdapter>(
    store: &S,
    command: ConstraintCommand,
    output: OutputMode,
) -> Result<(), ShiftplanError> {
    match command {
        ConstraintCommand::Add {
            worker_id,
            date,
            slot,
            reason,
        } => {
            let constraint = Constraint::blocking(WorkerId::new(worker_id), date, slot, reason);
            store.add_constraint(&constraint).await?;
            println!("added constraint {}", constraint.id);
        }
        ConstraintCommand::List { worker } => {
            let worker = worker.map(WorkerId::new);
            let constraints = store.list_constraints(worker.as_ref()).await?;
            if output.json {
                return render::print_json(&constraints);
            }
            render::print_constraints(&constraints);
        }
        ConstraintCommand::Remove { id } => {
            if !store.remove_constraint(&id).await? {
                return Err(ShiftplanError::not_found("constraint", id));
            }
            println!("removed constraint {id}");
        }
    }
    Ok(())
}

pub async fn run_preference<S: StorageAdapter>(
    store: &S,
    command: PreferenceCommand,
    output: OutputMode,
) -> Result<(), ShiftplanError> {
    match command {
        PreferenceCommand::Set {
            worker_id,
            first,
            second,
            third,
            notes,
        } => {
            let preference = Preference {
                worker_id: WorkerId::new(worker_id),
                notes,
                first_choice: non_blank(first),
                second_choice: non_blank(second),
                third_choice: non_blank(third),
            };
            store.upsert_preference(&preference).await?;
            println!("saved preferences for {}", preference.worker_id);
        }
        PreferenceCommand::Show { worker_id } => {
            let id = WorkerId::new(worker_id);
            let preference = store
                .get_preference(&id)
                .await?
                .ok_or_else(|| ShiftplanError::not_found("preference", id.as_str()))?;
            if output.json {
                return render::print_json(&preference);
            }
            render::print_preference(&preference);
        }
    }
    Ok(())
}

fn non_blank(choice: Option<String>) -> Option<String> {
    choice
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
}
