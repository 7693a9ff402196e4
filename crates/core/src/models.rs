pub mod availability;
pub mod schedule;

use chrono::{Datelike, NaiveDateTime};

use crate::errors::{SlotError, SlotResult};

/// Width of the `title` and `guest_user_name` columns.
pub const MAX_NAME_LENGTH: usize = 255;

/// Years a timeslot boundary may fall in. PostgreSQL `TIMESTAMP` rejects
/// values far outside this range.
pub const TIMESLOT_YEARS: std::ops::RangeInclusive<i32> = 1..=9999;

fn validate_name(field: &str, value: &str) -> SlotResult<()> {
    if value.trim().is_empty() {
        return Err(SlotError::Validation(format!("{field} must not be blank")));
    }
    // PostgreSQL text cannot store NUL.
    if value.contains('\0') {
        return Err(SlotError::Validation(format!("{field} must not contain NUL characters")));
    }
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(SlotError::Validation(format!(
            "{field} must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

fn validate_window(
    index: usize,
    start_time: NaiveDateTime,
    end_time: NaiveDateTime,
) -> SlotResult<()> {
    for (label, value) in [("start_time", start_time), ("end_time", end_time)] {
        if !TIMESLOT_YEARS.contains(&value.year()) {
            return Err(SlotError::Validation(format!(
                "timeslots[{index}]: {label} {value} is outside years {}..={}",
                TIMESLOT_YEARS.start(),
                TIMESLOT_YEARS.end()
            )));
        }
    }
    if end_time <= start_time {
        return Err(SlotError::Validation(format!(
            "timeslots[{index}]: end_time {end_time} must be after start_time {start_time}"
        )));
    }
    Ok(())
}
