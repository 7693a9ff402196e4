use axum::{
    Json,
    extract::{Path, State, rejection::{JsonRejection, PathRejection}},
};
use slotsync_core::{
    errors::SlotError,
    models::schedule::{CreateScheduleRequest, ScheduleWithAvailabilities, ScheduleWithTimeslots},
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

fn schedule_not_found(uuid: Uuid) -> SlotError {
    SlotError::NotFound(format!("Schedule with UUID {} not found", uuid))
}

#[axum::debug_handler]
pub async fn create_schedule(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CreateScheduleRequest>, JsonRejection>,
) -> Result<Json<ScheduleWithTimeslots>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let schedule = state.schedules.create_schedule(payload).await?;

    tracing::info!(
        "Schedule created: uuid={}, timeslots={}",
        schedule.uuid,
        schedule.schedule_timeslots.len()
    );
    Ok(Json(schedule))
}

#[axum::debug_handler]
pub async fn get_schedule(
    State(state): State<Arc<ApiState>>,
    uuid: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ScheduleWithTimeslots>, AppError> {
    let Path(uuid) = uuid?;

    let schedule = state
        .schedules
        .get_schedule(uuid)
        .await?
        .ok_or_else(|| schedule_not_found(uuid))?;

    Ok(Json(schedule))
}

#[axum::debug_handler]
pub async fn get_schedule_with_availabilities(
    State(state): State<Arc<ApiState>>,
    uuid: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ScheduleWithAvailabilities>, AppError> {
    let Path(uuid) = uuid?;

    let schedule = state
        .schedules
        .get_schedule_with_availabilities(uuid)
        .await?
        .ok_or_else(|| schedule_not_found(uuid))?;

    Ok(Json(schedule))
}
