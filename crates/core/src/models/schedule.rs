use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{availability::AvailabilityWithTimeslots, validate_name, validate_window};
use crate::errors::SlotResult;

/// One candidate time window on a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleTimeslot {
    pub id: i64,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A schedule together with its candidate timeslots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleWithTimeslots {
    pub uuid: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub schedule_timeslots: Vec<ScheduleTimeslot>,
}

/// A schedule joined with every guest availability submitted against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleWithAvailabilities {
    pub uuid: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub schedule_timeslots: Vec<ScheduleTimeslot>,
    pub availabilities: Vec<AvailabilityWithTimeslots>,
}

impl ScheduleWithAvailabilities {
    pub fn new(schedule: ScheduleWithTimeslots, availabilities: Vec<AvailabilityWithTimeslots>) -> Self {
        Self {
            uuid: schedule.uuid,
            title: schedule.title,
            created_at: schedule.created_at,
            updated_at: schedule.updated_at,
            schedule_timeslots: schedule.schedule_timeslots,
            availabilities,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateScheduleRequest {
    pub title: String,
    pub timeslots: Vec<CreateScheduleTimeslotRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateScheduleTimeslotRequest {
    #[serde(deserialize_with = "crate::datetime::deserialize")]
    pub start_time: NaiveDateTime,
    #[serde(deserialize_with = "crate::datetime::deserialize")]
    pub end_time: NaiveDateTime,
}

impl CreateScheduleRequest {
    /// Checks the request before anything touches the database.
    ///
    /// An empty `timeslots` list is accepted.
    pub fn validate(&self) -> SlotResult<()> {
        validate_name("title", &self.title)?;
        for (index, slot) in self.timeslots.iter().enumerate() {
            validate_window(index, slot.start_time, slot.end_time)?;
        }
        Ok(())
    }
}
