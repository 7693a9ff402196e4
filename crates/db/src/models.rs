use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use slotsync_core::models::{
    availability::{AvailabilityTimeslot, AvailabilityWithTimeslots},
    schedule::{ScheduleTimeslot, ScheduleWithTimeslots},
};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSchedule {
    pub uuid: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbScheduleTimeslot {
    pub id: i64,
    pub schedule_uuid: Uuid,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAvailability {
    pub id: i64,
    pub schedule_uuid: Uuid,
    pub guest_user_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAvailabilityTimeslot {
    pub id: i64,
    pub availability_id: i64,
    pub schedule_timeslot_id: i64,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbSchedule {
    pub fn with_timeslots(self, timeslots: Vec<DbScheduleTimeslot>) -> ScheduleWithTimeslots {
        ScheduleWithTimeslots {
            uuid: self.uuid,
            title: self.title,
            created_at: self.created_at,
            updated_at: self.updated_at,
            schedule_timeslots: timeslots.into_iter().map(Into::into).collect(),
        }
    }
}

impl DbAvailability {
    pub fn with_timeslots(self, timeslots: Vec<DbAvailabilityTimeslot>) -> AvailabilityWithTimeslots {
        AvailabilityWithTimeslots {
            id: self.id,
            schedule_uuid: self.schedule_uuid,
            guest_user_name: self.guest_user_name,
            created_at: self.created_at,
            updated_at: self.updated_at,
            availability_timeslots: timeslots.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<DbScheduleTimeslot> for ScheduleTimeslot {
    fn from(row: DbScheduleTimeslot) -> Self {
        Self {
            id: row.id,
            start_time: row.start_time,
            end_time: row.end_time,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<DbAvailabilityTimeslot> for AvailabilityTimeslot {
    fn from(row: DbAvailabilityTimeslot) -> Self {
        Self {
            id: row.id,
            schedule_timeslot_id: row.schedule_timeslot_id,
            start_time: row.start_time,
            end_time: row.end_time,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
