use async_trait::async_trait;
use chrono::NaiveDateTime;
use slotsync_core::{
    errors::SlotResult,
    models::availability::{AvailabilityWithTimeslots, CreateAvailabilityRequest},
};
use sqlx::PgConnection;
use uuid::Uuid;

use super::{PgRepository, attach_timeslots, db_error, finish};
use crate::models::{DbAvailability, DbAvailabilityTimeslot};

#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    /// Inserts the availability and all of its timeslots atomically.
    ///
    /// Nothing is checked up front: an unknown schedule, or a timeslot that
    /// belongs to a different schedule, is rejected by the foreign keys and
    /// surfaces as `SlotError::Integrity` after the rollback.
    async fn create_availability(
        &self,
        request: CreateAvailabilityRequest,
    ) -> SlotResult<AvailabilityWithTimeslots>;

    async fn get_availability(&self, id: i64) -> SlotResult<Option<AvailabilityWithTimeslots>>;

    /// Deletes the availability only when it belongs to `schedule_uuid`.
    ///
    /// An unknown id and a schedule mismatch both yield `Ok(None)`.
    async fn delete_availability(&self, id: i64, schedule_uuid: Uuid) -> SlotResult<Option<i64>>;
}

#[async_trait]
impl AvailabilityRepository for PgRepository {
    async fn create_availability(
        &self,
        request: CreateAvailabilityRequest,
    ) -> SlotResult<AvailabilityWithTimeslots> {
        tracing::debug!(
            "Creating availability: schedule_uuid={}, guest={}, timeslots={}",
            request.schedule_uuid, request.guest_user_name, request.timeslots.len()
        );

        let mut tx = self.begin().await?;
        let result = insert_availability(&mut tx, &request).await.map_err(db_error);
        let availability = finish(tx, result).await?;

        tracing::debug!("Availability created successfully: id={}", availability.id);
        Ok(availability)
    }

    async fn get_availability(&self, id: i64) -> SlotResult<Option<AvailabilityWithTimeslots>> {
        tracing::debug!("Getting availability by id: {}", id);

        let mut tx = self.begin().await?;
        let result = fetch_availability(&mut tx, id).await.map_err(db_error);
        finish(tx, result).await
    }

    async fn delete_availability(&self, id: i64, schedule_uuid: Uuid) -> SlotResult<Option<i64>> {
        tracing::debug!("Deleting availability: id={}, schedule_uuid={}", id, schedule_uuid);

        let mut tx = self.begin().await?;
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            DELETE FROM availabilities
            WHERE id = $1 AND schedule_uuid = $2
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(schedule_uuid)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error);
        let deleted = finish(tx, result).await?;

        if deleted.is_none() {
            tracing::debug!("No availability {} on schedule {}", id, schedule_uuid);
        }
        Ok(deleted)
    }
}

async fn insert_availability(
    conn: &mut PgConnection,
    request: &CreateAvailabilityRequest,
) -> sqlx::Result<AvailabilityWithTimeslots> {
    let availability = sqlx::query_as::<_, DbAvailability>(
        r#"
        INSERT INTO availabilities (schedule_uuid, guest_user_name)
        VALUES ($1, $2)
        RETURNING id, schedule_uuid, guest_user_name, created_at, updated_at
        "#,
    )
    .bind(request.schedule_uuid)
    .bind(&request.guest_user_name)
    .fetch_one(&mut *conn)
    .await?;

    if request.timeslots.is_empty() {
        return Ok(availability.with_timeslots(Vec::new()));
    }

    let mut timeslot_ids: Vec<i64> = Vec::with_capacity(request.timeslots.len());
    let mut starts: Vec<NaiveDateTime> = Vec::with_capacity(request.timeslots.len());
    let mut ends: Vec<NaiveDateTime> = Vec::with_capacity(request.timeslots.len());
    for slot in &request.timeslots {
        timeslot_ids.push(slot.schedule_timeslot_id);
        starts.push(slot.start_time);
        ends.push(slot.end_time);
    }

    let mut timeslots = sqlx::query_as::<_, DbAvailabilityTimeslot>(
        r#"
        INSERT INTO availability_timeslots
            (availability_id, schedule_uuid, schedule_timeslot_id, start_time, end_time)
        SELECT $1, $2, slot.schedule_timeslot_id, slot.start_time, slot.end_time
        FROM UNNEST($3::bigint[], $4::timestamp[], $5::timestamp[])
            AS slot(schedule_timeslot_id, start_time, end_time)
        RETURNING id, availability_id, schedule_timeslot_id, start_time, end_time, created_at, updated_at
        "#,
    )
    .bind(availability.id)
    .bind(availability.schedule_uuid)
    .bind(timeslot_ids)
    .bind(starts)
    .bind(ends)
    .fetch_all(&mut *conn)
    .await?;
    timeslots.sort_by_key(|slot| slot.id);

    Ok(availability.with_timeslots(timeslots))
}

async fn fetch_availability(conn: &mut PgConnection, id: i64) -> sqlx::Result<Option<AvailabilityWithTimeslots>> {
    let Some(availability) = sqlx::query_as::<_, DbAvailability>(
        r#"
        SELECT id, schedule_uuid, guest_user_name, created_at, updated_at
        FROM availabilities
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?
    else {
        return Ok(None);
    };

    let timeslots = sqlx::query_as::<_, DbAvailabilityTimeslot>(
        r#"
        SELECT id, availability_id, schedule_timeslot_id, start_time, end_time, created_at, updated_at
        FROM availability_timeslots
        WHERE availability_id = $1
        ORDER BY id ASC
        "#,
    )
    .bind(id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(Some(availability.with_timeslots(timeslots)))
}

/// Loads every availability of a schedule plus their timeslots in two
/// queries, the second keyed by the ids returned from the first.
pub(crate) async fn fetch_availabilities_for_schedule(
    conn: &mut PgConnection,
    schedule_uuid: Uuid,
) -> sqlx::Result<Vec<AvailabilityWithTimeslots>> {
    let availabilities = sqlx::query_as::<_, DbAvailability>(
        r#"
        SELECT id, schedule_uuid, guest_user_name, created_at, updated_at
        FROM availabilities
        WHERE schedule_uuid = $1
        ORDER BY id ASC
        "#,
    )
    .bind(schedule_uuid)
    .fetch_all(&mut *conn)
    .await?;

    if availabilities.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i64> = availabilities.iter().map(|availability| availability.id).collect();
    let timeslots = sqlx::query_as::<_, DbAvailabilityTimeslot>(
        r#"
        SELECT id, availability_id, schedule_timeslot_id, start_time, end_time, created_at, updated_at
        FROM availability_timeslots
        WHERE availability_id = ANY($1)
        ORDER BY id ASC
        "#,
    )
    .bind(ids)
    .fetch_all(&mut *conn)
    .await?;

    Ok(attach_timeslots(availabilities, timeslots))
}
