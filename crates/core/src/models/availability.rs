use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{validate_name, validate_window};
use crate::errors::SlotResult;

/// One window inside a guest's availability, linked to a schedule timeslot.
///
/// The window is the guest's own and may be narrower than the referenced
/// schedule timeslot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityTimeslot {
    pub id: i64,
    pub schedule_timeslot_id: i64,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWithTimeslots {
    pub id: i64,
    pub schedule_uuid: Uuid,
    pub guest_user_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub availability_timeslots: Vec<AvailabilityTimeslot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAvailabilityRequest {
    pub schedule_uuid: Uuid,
    pub guest_user_name: String,
    pub timeslots: Vec<CreateAvailabilityTimeslotRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAvailabilityTimeslotRequest {
    pub schedule_timeslot_id: i64,
    #[serde(deserialize_with = "crate::datetime::deserialize")]
    pub start_time: NaiveDateTime,
    #[serde(deserialize_with = "crate::datetime::deserialize")]
    pub end_time: NaiveDateTime,
}

impl CreateAvailabilityRequest {
    /// Shape checks only. Whether the schedule and its timeslots exist is
    /// left to the database constraints.
    pub fn validate(&self) -> SlotResult<()> {
        validate_name("guest_user_name", &self.guest_user_name)?;
        for (index, slot) in self.timeslots.iter().enumerate() {
            validate_window(index, slot.start_time, slot.end_time)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAvailabilityResponse {
    pub message: String,
    pub availability_id: i64,
    pub schedule_uuid: Uuid,
}

impl DeleteAvailabilityResponse {
    pub fn new(availability_id: i64, schedule_uuid: Uuid) -> Self {
        Self {
            message: format!("Availability {availability_id} deleted"),
            availability_id,
            schedule_uuid,
        }
    }
}
