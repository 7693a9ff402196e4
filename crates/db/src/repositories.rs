//! PostgreSQL-backed repositories.
//!
//! Every operation runs inside exactly one transaction on one pooled
//! connection. Multi-row writes commit together or not at all: when any
//! statement fails the transaction is rolled back explicitly before the error
//! is handed back to the caller. Absence of a row is reported as `Ok(None)`,
//! never as an error.

pub mod availability;
pub mod schedule;

use std::collections::HashMap;

use slotsync_core::{
    errors::{SlotError, SlotResult},
    models::availability::AvailabilityWithTimeslots,
};
use sqlx::{Postgres, Transaction, error::ErrorKind};
use tracing::warn;

use crate::{
    DbPool,
    models::{DbAvailability, DbAvailabilityTimeslot},
};

pub use availability::AvailabilityRepository;
pub use schedule::ScheduleRepository;

/// Repository implementation shared by the schedule and availability traits.
#[derive(Debug, Clone)]
pub struct PgRepository {
    pool: DbPool,
}

impl PgRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    async fn begin(&self) -> SlotResult<Transaction<'static, Postgres>> {
        self.pool.begin().await.map_err(db_error)
    }
}

/// Commits `tx` when `result` is a success, otherwise rolls it back and
/// returns the original error.
async fn finish<T>(tx: Transaction<'static, Postgres>, result: SlotResult<T>) -> SlotResult<T> {
    match result {
        Ok(value) => {
            tx.commit().await.map_err(db_error)?;
            Ok(value)
        }
        Err(err) => {
            match tx.rollback().await {
                Ok(()) => warn!(error = %err, "Transaction rolled back"),
                Err(rollback_err) => {
                    warn!(error = %err, rollback_error = %rollback_err, "Transaction rollback failed")
                }
            }
            Err(err)
        }
    }
}

/// Translates a driver error into the domain error.
///
/// Constraint violations mean the request referenced rows that do not exist
/// (or belong to another schedule) and become `SlotError::Integrity`;
/// everything else is an infrastructure failure.
pub(crate) fn db_error(err: sqlx::Error) -> SlotError {
    if let sqlx::Error::Database(db_err) = &err {
        let message = match db_err.kind() {
            ErrorKind::ForeignKeyViolation => Some(describe_foreign_key(db_err.constraint())),
            ErrorKind::CheckViolation => Some("end_time must be after start_time".to_string()),
            ErrorKind::NotNullViolation => Some(db_err.message().to_string()),
            _ => None,
        };
        if let Some(message) = message {
            return SlotError::Integrity(message);
        }
    }

    SlotError::Database(err.into())
}

fn describe_foreign_key(constraint: Option<&str>) -> String {
    match constraint {
        Some("availabilities_schedule_fkey") | Some("schedule_timeslots_schedule_fkey") => {
            "the referenced schedule does not exist".to_string()
        }
        Some("availability_timeslots_schedule_timeslot_fkey") => {
            "a schedule_timeslot_id does not exist on the referenced schedule".to_string()
        }
        Some("availability_timeslots_availability_fkey") => {
            "the referenced availability does not exist".to_string()
        }
        Some(other) => format!("foreign key constraint {other} violated"),
        None => "foreign key constraint violated".to_string(),
    }
}

/// Pairs each availability with its timeslots, keeping both inputs' order.
fn attach_timeslots(
    availabilities: Vec<DbAvailability>,
    timeslots: Vec<DbAvailabilityTimeslot>,
) -> Vec<AvailabilityWithTimeslots> {
    let mut by_availability: HashMap<i64, Vec<DbAvailabilityTimeslot>> = HashMap::new();
    for slot in timeslots {
        by_availability.entry(slot.availability_id).or_default().push(slot);
    }

    availabilities
        .into_iter()
        .map(|availability| {
            let slots = by_availability.remove(&availability.id).unwrap_or_default();
            availability.with_timeslots(slots)
        })
        .collect()
}
