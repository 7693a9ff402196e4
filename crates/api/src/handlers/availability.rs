//! # Availability Handlers
//!
//! Guests submit the subset of a schedule's timeslots they can attend, read
//! their submission back, and withdraw it. Deletion is scoped by the schedule
//! UUID so an availability cannot be removed through another schedule by
//! guessing its id.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
};
use serde::Deserialize;
use slotsync_core::{
    errors::SlotError,
    models::availability::{
        AvailabilityWithTimeslots, CreateAvailabilityRequest, DeleteAvailabilityResponse,
    },
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

/// Query parameters for `DELETE /availabilities/{id}`
#[derive(Debug, Deserialize)]
pub struct DeleteAvailabilityQuery {
    /// Schedule the availability must belong to
    pub schedule_uuid: Uuid,
}

/// Stores a guest's availability together with its timeslots.
///
/// The schedule and timeslot references are not looked up first. When the
/// database rejects them the insert is rolled back and the request answered
/// with 422.
#[axum::debug_handler]
pub async fn create_availability(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<CreateAvailabilityRequest>, JsonRejection>,
) -> Result<Json<AvailabilityWithTimeslots>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let availability = state.availabilities.create_availability(payload).await?;

    tracing::info!(
        "Availability created: id={}, schedule_uuid={}",
        availability.id,
        availability.schedule_uuid
    );
    Ok(Json(availability))
}

#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<AvailabilityWithTimeslots>, AppError> {
    let Path(id) = id?;

    let availability = state
        .availabilities
        .get_availability(id)
        .await?
        .ok_or_else(|| SlotError::NotFound(format!("Availability with ID {} not found", id)))?;

    Ok(Json(availability))
}

/// Deletes an availability and its timeslots.
///
/// A wrong id and an id that belongs to a different schedule are both
/// answered with 404.
#[axum::debug_handler]
pub async fn delete_availability(
    State(state): State<Arc<ApiState>>,
    id: Result<Path<i64>, PathRejection>,
    query: Result<Query<DeleteAvailabilityQuery>, QueryRejection>,
) -> Result<Json<DeleteAvailabilityResponse>, AppError> {
    let Path(id) = id?;
    let Query(query) = query?;

    let deleted = state
        .availabilities
        .delete_availability(id, query.schedule_uuid)
        .await?
        .ok_or_else(|| {
            SlotError::NotFound(format!(
                "Availability with ID {} not found on schedule {}",
                id, query.schedule_uuid
            ))
        })?;

    tracing::info!("Availability deleted: id={}, schedule_uuid={}", deleted, query.schedule_uuid);
    Ok(Json(DeleteAvailabilityResponse::new(deleted, query.schedule_uuid)))
}
